//! Per-flow dependency containers.
//!
//! # Responsibility
//! - Turn a dependency scope plus flow params into a wired
//!   (view model, view unit, coordinator) triple.
//!
//! # Invariants
//! - Building is pure: no I/O, no navigation, no tree mutation.
//! - Two builds give two independent instances.
//! - The attaching parent becomes the listener; containers never see it.

pub mod scope;

pub use crate::coordinator::Coordinating;
pub use scope::{
    AppDependencies, JoinScope, LoginScope, OrganizeScope, ProfileScope, ReportScope, SearchScope,
};

/// Factory bound to one dependency scope.
pub trait Container {
    type Scope;
    type Params;

    fn new(scope: Self::Scope) -> Self;

    fn coordinator(&self, params: Self::Params) -> Coordinating;
}
