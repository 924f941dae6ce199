//! Stack growth guard for deep recursion.
//!
//! Naftah programs nest freely: blocks inside loops inside functions inside
//! conditionals, and user recursion such as a factorial of 100 walks the
//! evaluator a few hundred frames deep per call. The parser and the
//! evaluator wrap their recursive entry points in [`ensure_sufficient_stack`]
//! so that depth is bounded by memory rather than by the native thread stack.
//!
//! On wasm targets the guard is a passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
///
/// ```text
/// fn eval_expr(&mut self, id: ExprId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_the_closure_result() {
        let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("نتيجة"));
        assert_eq!(result, Ok("نتيجة"));
    }

    #[test]
    fn survives_recursion_deeper_than_the_main_stack() {
        fn count_down(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { count_down(n - 1) + 1 })
        }

        assert_eq!(count_down(200_000), 200_000);
    }

    #[test]
    fn grows_for_wide_frames() {
        fn sum_frames(n: usize) -> usize {
            ensure_sufficient_stack(|| {
                let frame = [n; 64];
                if n == 0 {
                    0
                } else {
                    frame[n % 64] + sum_frames(n - 1) - n + 1
                }
            })
        }

        assert_eq!(sum_frames(20_000), 20_000);
    }
}
