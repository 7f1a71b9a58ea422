//! Planar geometry helpers shared by the clustering, white-space and heatmap
//! services. Pure functions, no state.

use std::collections::BTreeMap;

use crate::api::ConstellationPoint;

/// Axis-aligned bounding box in the reduced x/y plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Grow each axis by `fraction` of its extent on both sides.
    pub fn padded(&self, fraction: f64) -> BoundingBox {
        let pad_x = self.width() * fraction;
        let pad_y = self.height() * fraction;
        BoundingBox {
            x_min: self.x_min - pad_x,
            x_max: self.x_max + pad_x,
            y_min: self.y_min - pad_y,
            y_max: self.y_max + pad_y,
        }
    }
}

/// Bounding box over raw `(x, y)` pairs; all zeros when empty.
pub fn bounding_box_of<I>(coords: I) -> BoundingBox
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut iter = coords.into_iter();
    let Some((x0, y0)) = iter.next() else {
        return BoundingBox::default();
    };

    iter.fold(
        BoundingBox {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        },
        |bbox, (x, y)| BoundingBox {
            x_min: bbox.x_min.min(x),
            x_max: bbox.x_max.max(x),
            y_min: bbox.y_min.min(y),
            y_max: bbox.y_max.max(y),
        },
    )
}

/// Bounding box of the points' x/y coordinates; all zeros for an empty set.
pub fn compute_bounding_box(points: &[ConstellationPoint]) -> BoundingBox {
    bounding_box_of(points.iter().map(|p| (p.x, p.y)))
}

pub fn euclidean_distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// Sorted, deduplicated copy of `values`, skipping blanks.
pub fn unique_sorted<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Group items by key with ordered iteration.
pub fn group_by_key<'a, T, K, F>(items: &'a [T], key: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Deduplicate while keeping the first occurrence order.
pub fn dedup_preserving_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_bounding_box_is_zero() {
        let bbox = bounding_box_of(std::iter::empty());
        assert_eq!(bbox, BoundingBox::default());
        assert_eq!(bbox.area(), 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = bounding_box_of(vec![(1.0, -2.0), (-3.0, 4.0), (0.5, 0.5)]);
        assert_eq!(bbox.x_min, -3.0);
        assert_eq!(bbox.x_max, 1.0);
        assert_eq!(bbox.y_min, -2.0);
        assert_eq!(bbox.y_max, 4.0);
        assert_eq!(bbox.area(), 24.0);
    }

    #[test]
    fn test_padded() {
        let bbox = bounding_box_of(vec![(0.0, 0.0), (10.0, 20.0)]).padded(0.1);
        assert_eq!(bbox.x_min, -1.0);
        assert_eq!(bbox.x_max, 11.0);
        assert_eq!(bbox.y_min, -2.0);
        assert_eq!(bbox.y_max, 22.0);
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(euclidean_distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_unique_sorted() {
        let out = unique_sorted(vec!["C07D", "A61K", " ", "C07D"]);
        assert_eq!(out, vec!["A61K".to_string(), "C07D".to_string()]);
    }

    #[test]
    fn test_group_by_key_is_ordered() {
        let items = vec![("b", 1), ("a", 2), ("b", 3)];
        let groups = group_by_key(&items, |(k, _)| k.to_string());
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(groups["b"].len(), 2);
    }

    #[test]
    fn test_dedup_preserving_order() {
        let values = vec!["m2".to_string(), "m1".to_string(), "m2".to_string()];
        assert_eq!(
            dedup_preserving_order(&values),
            vec!["m2".to_string(), "m1".to_string()]
        );
    }

    proptest! {
        #[test]
        fn prop_bounding_box_is_ordered(coords in prop::collection::vec((-1e6..1e6f64, -1e6..1e6f64), 1..64)) {
            let bbox = bounding_box_of(coords.clone());
            prop_assert!(bbox.x_min <= bbox.x_max);
            prop_assert!(bbox.y_min <= bbox.y_max);
            for (x, y) in coords {
                prop_assert!(x >= bbox.x_min && x <= bbox.x_max);
                prop_assert!(y >= bbox.y_min && y <= bbox.y_max);
            }
        }
    }
}
