//! Stack safety for deep recursion.
//!
//! The evaluator recurses through nested expressions and user-level calls;
//! [`ensure_sufficient_stack`] grows the stack on demand so deeply nested
//! but otherwise legal programs cannot overflow the native stack. The
//! user-visible recursion *limit* is enforced separately by the call
//! dispatcher.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, additional
/// stack space is allocated before calling `f`.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
