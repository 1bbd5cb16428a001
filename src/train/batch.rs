//! Batch data structure and batch source contract

/// A training batch containing inputs and targets
#[derive(Clone, Debug)]
pub struct Batch<I, T> {
    /// Input features
    pub input: I,
    /// Target labels/values
    pub target: T,
}

impl<I, T> Batch<I, T> {
    /// Create a new batch
    pub fn new(input: I, target: T) -> Self {
        Self { input, target }
    }
}

/// Produces one finite pass of batches per epoch.
///
/// Each call to [`iter`](BatchSource::iter) starts a fresh pass over the
/// underlying data, so the same source can feed every epoch of a run. The
/// iterator is pulled synchronously; any prefetching or shuffling belongs
/// to the implementation.
pub trait BatchSource {
    type Input;
    type Target;

    /// Start a fresh pass over the data
    fn iter(&mut self) -> Box<dyn Iterator<Item = Batch<Self::Input, Self::Target>> + '_>;
}

impl<I: Clone + 'static, T: Clone + 'static> BatchSource for Vec<Batch<I, T>> {
    type Input = I;
    type Target = T;

    fn iter(&mut self) -> Box<dyn Iterator<Item = Batch<I, T>> + '_> {
        Box::new(<[Batch<I, T>]>::iter(self).cloned())
    }
}
