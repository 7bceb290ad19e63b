//! Compact sets of device identifiers.
//!
//! A [`DeviceSet`] is a growable bit-vector keyed by [`DeviceId`]. Word
//! `id / 64` holds bit `id % 64`. Sets only ever accumulate devices: there is
//! no removal, intersection or difference.

use super::id::DeviceId;
use std::iter::FusedIterator;

const WORD_BITS: u32 = u64::BITS;

/// A set of devices belonging to one catalog.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceSet {
    storage: Vec<u64>,
}

impl DeviceSet {
    /// Creates an empty set without allocating.
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    /// Adds `device` to the set, growing storage as needed.
    pub fn insert(&mut self, device: DeviceId) {
        let word_index = (device.id() / WORD_BITS) as usize;
        let bit_index = device.id() % WORD_BITS;

        if word_index >= self.storage.len() {
            self.storage.resize(word_index + 1, 0);
        }

        self.storage[word_index] |= 1u64 << bit_index;
    }

    /// Adds every member of `other` to this set.
    pub fn union_with(&mut self, other: &Self) {
        if other.storage.len() > self.storage.len() {
            self.storage.resize(other.storage.len(), 0);
        }

        for (word, &bits) in self.storage.iter_mut().zip(&other.storage) {
            *word |= bits;
        }
    }

    /// Returns `true` if no device is in the set.
    pub fn is_empty(&self) -> bool {
        self.storage.iter().all(|&word| word == 0)
    }

    /// Returns `true` if `device` is in the set.
    pub fn contains(&self, device: DeviceId) -> bool {
        let word_index = (device.id() / WORD_BITS) as usize;
        let bit_index = device.id() % WORD_BITS;
        self.storage
            .get(word_index)
            .is_some_and(|word| word & (1u64 << bit_index) != 0)
    }

    /// Number of devices in the set.
    pub fn len(&self) -> usize {
        self.storage
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Number of backing words currently allocated.
    pub fn word_count(&self) -> usize {
        self.storage.len()
    }

    /// Iterates over members in ascending identifier order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.storage,
            word_index: 0,
            current: self.storage.first().copied().unwrap_or(0),
        }
    }

    /// Visits members in ascending order until `visit` returns `false`.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(DeviceId) -> bool,
    {
        for device in self.iter() {
            if !visit(device) {
                break;
            }
        }
    }
}

// Membership equality: trailing zero words do not matter.
impl PartialEq for DeviceSet {
    fn eq(&self, other: &Self) -> bool {
        let (shorter, longer) = if self.storage.len() <= other.storage.len() {
            (&self.storage, &other.storage)
        } else {
            (&other.storage, &self.storage)
        };

        shorter == &longer[..shorter.len()] && longer[shorter.len()..].iter().all(|&w| w == 0)
    }
}

impl Eq for DeviceSet {}

impl FromIterator<DeviceId> for DeviceSet {
    fn from_iter<I: IntoIterator<Item = DeviceId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<DeviceId> for DeviceSet {
    fn extend<I: IntoIterator<Item = DeviceId>>(&mut self, iter: I) {
        for device in iter {
            self.insert(device);
        }
    }
}

impl<'a> IntoIterator for &'a DeviceSet {
    type Item = DeviceId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`DeviceSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = DeviceId;

    #[allow(clippy::cast_possible_truncation)] // word indices come from u32 ids
    fn next(&mut self) -> Option<DeviceId> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros();
                self.current &= self.current - 1;
                return Some(DeviceId::new(self.word_index as u32 * WORD_BITS + bit));
            }

            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
    }
}

impl FusedIterator for Iter<'_> {}
