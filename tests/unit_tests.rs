//! Public-API unit tests for stepper-pulse.

mod unit;
