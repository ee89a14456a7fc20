use std::iter::repeat;
use std::path::{Path, PathBuf};

/// First `root/subpath` for which `search` holds.
pub fn find_first_subpath<P: AsRef<Path>, F: Fn(&Path) -> bool>(
    root: impl AsRef<Path>,
    subpaths: &[P],
    search: F,
) -> Option<PathBuf> {
    subpaths
        .iter()
        .zip(repeat(root.as_ref()))
        .map(|(b, a)| a.join(b))
        .find(|it: &PathBuf| search(it))
}

/// Turns the literal escape `\n` typed on a single line into a newline.
pub fn unescape_newlines(line: &str) -> String {
    line.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_subpath_wins() {
        let found = find_first_subpath("/cfg", &["a.yml", "b.yml"], |p| p.ends_with("b.yml"));
        assert_eq!(found, Some(PathBuf::from("/cfg/b.yml")));
        assert_eq!(find_first_subpath("/cfg", &["a.yml"], |_| false), None);
    }

    #[test]
    fn newline_escapes() {
        assert_eq!(unescape_newlines("a\\nb"), "a\nb");
        assert_eq!(unescape_newlines("plain"), "plain");
    }
}
