use crate::app::Response;

/// Empty input goes back, `q`/`quit` ends the session.
pub fn back_or_quit<C>(line: &str) -> Option<Response<C>> {
    match line {
        "" => Some(Response::Pop(None)),
        _ if is_quit(line) => Some(Response::Quit),
        _ => None,
    }
}

pub fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit")
}

/// Resolve a 1-based number or a case-insensitive name to an index.
pub fn select<'a, I>(line: &str, names: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    if let Ok(n) = line.parse::<usize>() {
        return (1..=names.len()).contains(&n).then(|| n - 1);
    }
    names.iter().position(|name| name.eq_ignore_ascii_case(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_number_or_name() {
        let names = ["basics", "Advanced"];
        assert_eq!(select("1", names), Some(0));
        assert_eq!(select("advanced", names), Some(1));
        assert_eq!(select("0", names), None);
        assert_eq!(select("3", names), None);
        assert_eq!(select("nope", names), None);
    }

    #[test]
    fn empty_goes_back_and_q_quits() {
        assert!(matches!(back_or_quit::<()>(""), Some(Response::Pop(None))));
        assert!(matches!(back_or_quit::<()>("Quit"), Some(Response::Quit)));
        assert!(back_or_quit::<()>("run").is_none());
    }
}
