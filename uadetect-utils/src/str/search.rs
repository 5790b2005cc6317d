/// Returns `true` if `s` ends with `sub`, using ASCII case insensitive comparison.
///
/// If `sub` is empty, this returns `true`.
pub fn ends_with_ignore_ascii_case<T1, T2>(s: T1, sub: T2) -> bool
where
    T1: AsRef<[u8]>,
    T2: AsRef<[u8]>,
{
    let s = s.as_ref();
    let sub = sub.as_ref();
    let n = sub.len();

    let start_index = s.len().checked_sub(n);
    start_index
        .and_then(|i| s.get(i..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(sub))
}

/// Returns `s` without the suffix `sub` if `s` ends with it,
/// using ASCII case insensitive comparison.
///
/// Returns `None` if the suffix is not present
/// or if removing it would not end on a char boundary.
pub fn strip_suffix_ignore_ascii_case<'a>(s: &'a str, sub: &str) -> Option<&'a str> {
    if !ends_with_ignore_ascii_case(s, sub) {
        return None;
    }
    s.get(..s.len() - sub.len())
}

/// Returns `true` if any item produced by `candidates` equals `s`,
/// using ASCII case insensitive comparison.
///
/// Iteration order does not matter for the result, only for the amount of work performed.
pub fn any_eq_ignore_ascii_case<T, I>(s: T, candidates: I) -> bool
where
    T: AsRef<[u8]>,
    I: IntoIterator<Item: AsRef<[u8]>>,
{
    let s = s.as_ref();
    candidates
        .into_iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(s))
}
