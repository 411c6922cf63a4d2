use std::collections::HashSet;
use std::io::{self, Write};

use crate::config::BaseUrl;
use crate::scanner::extract::UniqueValues;

/// Non-informative tokens status pages emit in place of a path.
#[derive(Clone, Debug, Default)]
pub struct Blacklist {
    values: HashSet<String>,
}

impl Blacklist {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact match only, `/admin` is not hidden by `/`.
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

/// Ascending byte-wise order with blacklisted values removed.
pub fn finalize<'v>(values: &'v UniqueValues, blacklist: &Blacklist) -> Vec<&'v str> {
    values
        .iter()
        .map(String::as_str)
        .filter(|v| !blacklist.contains(v))
        .collect()
}

/// Write one value per line, prefixed with the base URL when given.
pub fn render<W: Write>(
    out: &mut W,
    values: &[&str],
    prefix: Option<&BaseUrl>,
) -> io::Result<()> {
    for value in values {
        match prefix {
            Some(base) => writeln!(out, "{}{}", base, value)?,
            None => writeln!(out, "{}", value)?,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> UniqueValues {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn default_blacklist() -> Blacklist {
        Blacklist::new(["*", "-", "/"])
    }

    #[test]
    fn sorted_and_filtered() {
        let set = values(&["/zeta", "*", "/admin", "-", "/", "/Admin", "/admin/"]);
        let out = finalize(&set, &default_blacklist());
        assert_eq!(out, vec!["/Admin", "/admin", "/admin/", "/zeta"]);
    }

    #[test]
    fn blacklist_is_exact_match() {
        let set = values(&["/*", "--", "/-"]);
        assert_eq!(finalize(&set, &default_blacklist()).len(), 3);
    }

    #[test]
    fn custom_blacklist_replaces_default() {
        let set = values(&["*", "/health"]);
        let out = finalize(&set, &Blacklist::new(["/health"]));
        assert_eq!(out, vec!["*"]);
    }

    #[test]
    fn renders_bare_and_absolute() {
        let set = values(&["/b", "/a"]);
        let ordered = finalize(&set, &default_blacklist());

        let mut bare = Vec::new();
        render(&mut bare, &ordered, None).unwrap();
        assert_eq!(String::from_utf8(bare).unwrap(), "/a\n/b\n");

        let base = BaseUrl::parse("http://10.1.1.1:8080/ignored").unwrap();
        let mut absolute = Vec::new();
        render(&mut absolute, &ordered, Some(&base)).unwrap();
        assert_eq!(
            String::from_utf8(absolute).unwrap(),
            "http://10.1.1.1:8080/a\nhttp://10.1.1.1:8080/b\n"
        );
    }

    #[test]
    fn nothing_to_render_writes_nothing() {
        let mut out = Vec::new();
        render(&mut out, &[], None).unwrap();
        assert!(out.is_empty());
    }
}
