pub use enclose::*;

/// Builds a [`Reaction`](crate::Reaction) from a priority and a body,
/// optionally cloning captures first.
///
/// ```ignore
/// let view = reaction!((label) 2 => label.refresh());
/// ```
#[macro_export]
macro_rules! reaction {
    (( $($d_tt:tt)* ) $priority:expr => $($b:tt)*) => {
        $crate::Reaction::new($priority, $crate::macros::enclose!(($( $d_tt )*) Box::new(move || { $($b)* })))
    };
    ($priority:expr => $($b:tt)*) => {
        $crate::Reaction::new($priority, Box::new(move || { $($b)* }))
    };
}
