pub mod compare;
pub mod constellation;
pub mod distribution;
pub mod heatmap;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        assert_eq!(
            super::constellation::GENERATE_CONSTELLATION,
            "generate_constellation"
        );
        assert_eq!(
            super::distribution::GET_DOMAIN_DISTRIBUTION,
            "get_domain_distribution"
        );
        assert_eq!(
            super::compare::COMPARE_WITH_COMPETITOR,
            "compare_with_competitor"
        );
        assert_eq!(super::heatmap::GET_COVERAGE_HEATMAP, "get_coverage_heatmap");
    }
}
