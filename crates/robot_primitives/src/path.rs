//! Paths annotated with named per-point attributes.
use std::collections::BTreeMap;
use std::ops::AddAssign;

use glam::DVec2;

use crate::error::{Error, Result};

/// Ordered points with named scalar attributes and a running Euclidean length.
///
/// Every attribute holds exactly one entry per point; `None` marks an unset value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstrainedPath {
    coords: Vec<DVec2>,
    attributes: BTreeMap<String, Vec<Option<f64>>>,
    length: f64,
}

impl ConstrainedPath {
    /// Path through `coords` without attributes.
    pub fn new<I, P>(coords: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        let coords: Vec<DVec2> = coords.into_iter().map(Into::into).collect();
        let length = polyline_length(&coords);
        Self {
            coords,
            attributes: BTreeMap::new(),
            length,
        }
    }

    /// Adds the attribute `name`, one value per point.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self> {
        self.set_attribute(name, values)?;
        Ok(self)
    }

    /// Appends `point`, taking values for the named attributes from `values`.
    ///
    /// Existing attributes not mentioned are padded with `None`; new names are back-filled
    /// with `None` for the earlier points.
    pub fn add_point(&mut self, point: impl Into<DVec2>, values: &[(&str, f64)]) {
        let point = point.into();
        if let Some(last) = self.coords.last() {
            self.length += last.distance(point);
        }
        let previous = self.coords.len();
        self.coords.push(point);

        for (name, _) in values {
            self.attributes
                .entry((*name).to_owned())
                .or_insert_with(|| vec![None; previous]);
        }
        for (name, column) in self.attributes.iter_mut() {
            let value = values
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| *v);
            column.push(value);
        }
    }

    pub fn get(&self, index: usize) -> Option<DVec2> {
        self.coords.get(index).copied()
    }

    pub fn coords(&self) -> &[DVec2] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Cumulative Euclidean length.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_constrained(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names in sorted order.
    pub fn constrained_parameters(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&[Option<f64>]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// Replaces or adds an attribute. `values` must have one entry per point.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        if values.len() != self.coords.len() {
            return Err(Error::InvalidConfig(format!(
                "attribute '{name}' has {} values for {} points",
                values.len(),
                self.coords.len()
            )));
        }
        self.attributes.insert(name, values);
        Ok(())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Vec<Option<f64>>> {
        self.attributes.remove(name)
    }

    pub(crate) fn attributes(&self) -> &BTreeMap<String, Vec<Option<f64>>> {
        &self.attributes
    }
}

impl AddAssign for ConstrainedPath {
    /// Appends `other`, joining the two paths with a straight bridge.
    ///
    /// Attributes present on only one side are padded with `None` on the other.
    fn add_assign(&mut self, mut other: ConstrainedPath) {
        if let (Some(last), Some(first)) = (self.coords.last(), other.coords.first()) {
            self.length += last.distance(*first);
        }
        self.length += other.length;

        let (ours, theirs) = (self.coords.len(), other.coords.len());
        for (name, column) in self.attributes.iter_mut() {
            match other.attributes.remove(name) {
                Some(values) => column.extend(values),
                None => column.extend(std::iter::repeat_n(None, theirs)),
            }
        }
        for (name, values) in other.attributes {
            let mut column = vec![None; ours];
            column.extend(values);
            self.attributes.insert(name, column);
        }
        self.coords.extend(other.coords);
    }
}

fn polyline_length(coords: &[DVec2]) -> f64 {
    coords.windows(2).map(|w| w[0].distance(w[1])).sum()
}
