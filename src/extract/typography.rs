//! Font size statistics and the header size threshold.

use crate::model::DEFAULT_HEADER_SIZE_THRESHOLD;

/// Every span font size observed in a document, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSizeSamples {
    sizes: Vec<f32>,
}

impl FontSizeSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, size: f32) {
        self.sizes.push(size);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.sizes
    }

    /// Element at index `n / 2` of the ascending sort.
    ///
    /// No averaging: for even counts this picks `sorted[n/2]` as is.
    pub fn lower_median(&self) -> Option<f32> {
        if self.sizes.is_empty() {
            return None;
        }
        let mut sorted = self.sizes.clone();
        sorted.sort_by(f32::total_cmp);
        Some(sorted[sorted.len() / 2])
    }
}

impl FromIterator<f32> for FontSizeSamples {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}

impl Extend<f32> for FontSizeSamples {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        self.sizes.extend(iter);
    }
}

/// Derives the header size threshold from a document's font sizes.
///
/// The core only reports the threshold; classifying lines against it is
/// left to consumers.
pub trait HeaderThresholdStrategy: Send + Sync {
    fn threshold(&self, samples: &FontSizeSamples) -> f32;
}

/// `sorted[n/2] + offset`, or `fallback` when no sizes were observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedianOffset {
    pub offset: f32,
    pub fallback: f32,
}

impl Default for MedianOffset {
    fn default() -> Self {
        Self {
            offset: 1.0,
            fallback: DEFAULT_HEADER_SIZE_THRESHOLD,
        }
    }
}

impl HeaderThresholdStrategy for MedianOffset {
    fn threshold(&self, samples: &FontSizeSamples) -> f32 {
        samples
            .lower_median()
            .map(|median| median + self.offset)
            .unwrap_or(self.fallback)
    }
}
