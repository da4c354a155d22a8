//! Step line shared between the foreground and the timer interrupt.
//!
//! The STEP pin lives in one [`SharedState`] cell. The motion engine and the
//! interrupt-side [`StepTicker`](super::StepTicker) each hold a [`SharedPin`]
//! handle to it. Every pin operation locks the cell for that one operation
//! only, so the interrupt can preempt the waits of a blocking run.
//!
//! ```rust,ignore
//! static STEP: CsState<StepPin> = CsState::new(step_pin);
//! static PROGRAM: RateProgram = RateProgram::new();
//!
//! let mut engine = MotionEngine::builder()
//!     .step_pin(SharedPin::new(&STEP))
//!     // ...
//!     .build()?;
//!
//! // in the timer interrupt:
//! StepTicker::new(&PROGRAM, SharedPin::new(&STEP)).on_tick()?;
//! ```

use core::cell::RefCell;
use core::marker::PhantomData;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

/// Platform-agnostic synchronized state access.
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

/// Interrupt-safe state guarded by a critical section.
///
/// Usable in a `static` shared with an interrupt handler.
pub struct CsState<T> {
    inner: critical_section::Mutex<RefCell<T>>,
}

impl<T> CsState<T> {
    /// Wrap a value.
    pub const fn new(value: T) -> Self {
        Self {
            inner: critical_section::Mutex::new(RefCell::new(value)),
        }
    }
}

impl<T> SharedState<T> for CsState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

/// Single-context state using a `RefCell`.
///
/// For host simulation where "interrupts" run on the calling thread.
///
/// # Panics
///
/// Panics on re-entrant `with_mut`, which would mean a pin operation was
/// interrupted by another operation on the same pin.
pub struct LocalState<T> {
    inner: RefCell<T>,
}

impl<T> LocalState<T> {
    /// Wrap a value.
    pub const fn new(value: T) -> Self {
        Self {
            inner: RefCell::new(value),
        }
    }

    /// Unwrap the value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T> SharedState<T> for LocalState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}

/// Output pin handle into a [`SharedState`] cell.
///
/// Several handles may point at the same pin.
pub struct SharedPin<'a, P, S> {
    cell: &'a S,
    _pin: PhantomData<fn() -> P>,
}

impl<'a, P, S> SharedPin<'a, P, S>
where
    P: StatefulOutputPin,
    S: SharedState<P>,
{
    /// Create a handle to the pin in `cell`.
    pub fn new(cell: &'a S) -> Self {
        Self {
            cell,
            _pin: PhantomData,
        }
    }
}

impl<P, S> Clone for SharedPin<'_, P, S> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell,
            _pin: PhantomData,
        }
    }
}

impl<P, S> ErrorType for SharedPin<'_, P, S>
where
    P: StatefulOutputPin,
    S: SharedState<P>,
{
    type Error = P::Error;
}

impl<P, S> OutputPin for SharedPin<'_, P, S>
where
    P: StatefulOutputPin,
    S: SharedState<P>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.cell.with_mut(|pin| pin.set_low())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.cell.with_mut(|pin| pin.set_high())
    }
}

impl<P, S> StatefulOutputPin for SharedPin<'_, P, S>
where
    P: StatefulOutputPin,
    S: SharedState<P>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.cell.with_mut(|pin| pin.is_set_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.cell.with_mut(|pin| pin.is_set_low())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.cell.with_mut(|pin| pin.toggle())
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::sim::{Line, SimPin, Trace};

    #[test]
    fn test_handles_share_one_pin() {
        let trace = Trace::new();
        let cell = LocalState::new(trace.pin(Line::Step, false));
        let mut a = SharedPin::<SimPin, _>::new(&cell);
        let mut b = a.clone();

        a.toggle().unwrap();
        assert!(b.is_set_high().unwrap());
        b.toggle().unwrap();
        assert!(a.is_set_low().unwrap());

        assert_eq!(trace.edges_on(Line::Step).len(), 2);
        assert!(!cell.into_inner().is_high());
    }

    #[test]
    fn test_critical_section_cell() {
        let trace = Trace::new();
        let cell = CsState::new(trace.pin(Line::Step, false));
        let mut pin = SharedPin::<SimPin, _>::new(&cell);

        pin.set_high().unwrap();

        assert!(cell.with(|pin| pin.is_high()));
        assert_eq!(trace.edges_on(Line::Step).len(), 1);
    }
}
