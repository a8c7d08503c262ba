//! Processor API
//!
//! This module provides the [`DataProcessor`] trait, the uniform single-method
//! contract a processing stage exposes, and [`CustomDataProcessor`], the
//! adapter that turns a user-supplied function into such a stage.

use crate::types::{Data, Result};
use std::fmt;
use std::sync::Arc;

/// A type-erased processor that can be stored and shared across threads
pub type BoxedDataProcessor = Box<dyn DataProcessor + Send + Sync>;

/// A processing stage that maps one data value to another
pub trait DataProcessor {
    /// Process a single data value
    ///
    /// Ownership of `data` moves into the call; ownership of the returned value
    /// moves to the caller.
    fn process(&self, data: Data) -> Result<Data>;

    /// Lazily apply this processor to each value of `inputs`
    ///
    /// # Example
    /// ```
    /// use data_processor::{CustomDataProcessor, Data, DataProcessor};
    ///
    /// let double = CustomDataProcessor::new(|d: Data| {
    ///     Ok(Data::Int(d.as_int().unwrap_or_default() * 2))
    /// });
    ///
    /// let outputs: Vec<Data> = double
    ///     .process_iter(vec![Data::Int(1), Data::Int(2)])
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    ///
    /// assert_eq!(outputs, vec![Data::Int(2), Data::Int(4)]);
    /// ```
    fn process_iter<I>(&self, inputs: I) -> ProcessedIter<'_, Self, I::IntoIter>
    where
        I: IntoIterator<Item = Data>,
        Self: Sized,
    {
        ProcessedIter::new(self, inputs.into_iter())
    }
}

impl<P: DataProcessor + ?Sized> DataProcessor for &P {
    fn process(&self, data: Data) -> Result<Data> {
        (**self).process(data)
    }
}

impl<P: DataProcessor + ?Sized> DataProcessor for Box<P> {
    fn process(&self, data: Data) -> Result<Data> {
        (**self).process(data)
    }
}

impl<P: DataProcessor + ?Sized> DataProcessor for Arc<P> {
    fn process(&self, data: Data) -> Result<Data> {
        (**self).process(data)
    }
}

/// Adapter that invokes a user-supplied transformation function
///
/// The adapter holds no state besides the function. It never looks at the
/// value it is given, and any error the function returns comes back to the
/// caller exactly as the function produced it.
///
/// # Example
/// ```
/// use data_processor::{CustomDataProcessor, Data, DataProcessor, ProcessError};
///
/// let upper = CustomDataProcessor::new(|d: Data| match d {
///     Data::String(s) => Ok(Data::String(s.to_uppercase())),
///     other => Err(ProcessError::custom(format!("cannot uppercase {}", other.kind()))),
/// });
///
/// assert_eq!(upper.process(Data::from("abc")).unwrap(), Data::from("ABC"));
/// assert!(upper.process(Data::Int(1)).is_err());
/// ```
pub struct CustomDataProcessor<F> {
    f: F,
}

impl<F> CustomDataProcessor<F>
where
    F: Fn(Data) -> Result<Data>,
{
    /// Create an adapter around `f`
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Recover the wrapped function
    pub fn into_inner(self) -> F {
        self.f
    }

    /// Erase the function type so the adapter can be stored next to other processors
    pub fn boxed(self) -> BoxedDataProcessor
    where
        F: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<F> DataProcessor for CustomDataProcessor<F>
where
    F: Fn(Data) -> Result<Data>,
{
    fn process(&self, data: Data) -> Result<Data> {
        (self.f)(data)
    }
}

impl<F> fmt::Debug for CustomDataProcessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDataProcessor").finish_non_exhaustive()
    }
}

/// Iterator that feeds successive data values through a processor
///
/// Each input is processed exactly once, in order, when `next` is called.
/// A failed item is yielded as an `Err` and iteration carries on with the
/// following input.
pub struct ProcessedIter<'a, P, I>
where
    P: DataProcessor + ?Sized,
    I: Iterator<Item = Data>,
{
    processor: &'a P,
    inputs: I,
    processed: usize,
}

impl<'a, P, I> ProcessedIter<'a, P, I>
where
    P: DataProcessor + ?Sized,
    I: Iterator<Item = Data>,
{
    pub fn new(processor: &'a P, inputs: I) -> Self {
        Self {
            processor,
            inputs,
            processed: 0,
        }
    }

    /// Number of values handed to the processor so far
    pub fn processed(&self) -> usize {
        self.processed
    }
}

impl<'a, P, I> Iterator for ProcessedIter<'a, P, I>
where
    P: DataProcessor + ?Sized,
    I: Iterator<Item = Data>,
{
    type Item = Result<Data>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inputs.next() {
            Some(data) => {
                self.processed += 1;
                Some(self.processor.process(data))
            }
            None => {
                log::debug!("Input exhausted after {} values", self.processed);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inputs.size_hint()
    }
}

impl<P, I> fmt::Debug for ProcessedIter<'_, P, I>
where
    P: DataProcessor + ?Sized,
    I: Iterator<Item = Data>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessedIter")
            .field("processed", &self.processed)
            .finish_non_exhaustive()
    }
}
