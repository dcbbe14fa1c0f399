//! Line classification and numeric field parsing.

/// Record type of a single OBJ line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    Position,
    Texcoord,
    Normal,
    Face,
    /// Any other directive (`usemtl`, `mtllib`, `g`, ...), with its tag.
    Unknown(&'a str),
}

/// A classified line: its record type plus the remaining fields.
#[derive(Clone, Debug)]
pub struct ScannedLine<'a> {
    pub kind: LineKind<'a>,
    fields: &'a str,
}

impl<'a> ScannedLine<'a> {
    /// Whitespace-separated fields following the tag.
    pub fn fields(&self) -> std::str::SplitWhitespace<'a> {
        self.fields.split_whitespace()
    }
}

/// Classify `line` by its leading token.
///
/// The tag has to be a whole token, so `vp 1 2` is `Unknown("vp")`, not a position.
pub fn scan_line(line: &str) -> ScannedLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ScannedLine {
            kind: LineKind::Blank,
            fields: "",
        };
    }
    if trimmed.starts_with('#') {
        return ScannedLine {
            kind: LineKind::Comment,
            fields: "",
        };
    }

    let (tag, fields) = match trimmed.find(char::is_whitespace) {
        Some(at) => (&trimmed[..at], &trimmed[at..]),
        None => (trimmed, ""),
    };

    let kind = match tag {
        "v" => LineKind::Position,
        "vt" => LineKind::Texcoord,
        "vn" => LineKind::Normal,
        "f" => LineKind::Face,
        other => LineKind::Unknown(other),
    };
    ScannedLine { kind, fields }
}

/// Parse the first `N` fields as floats. Extra fields are ignored.
///
/// Returns `None` if fewer than `N` fields are present or one of them is not a number.
pub fn parse_floats<'a, const N: usize>(
    mut fields: impl Iterator<Item = &'a str>,
) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in out.iter_mut() {
        *slot = fields.next()?.parse::<f32>().ok()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_supported_records() {
        assert_eq!(scan_line("v 1 2 3").kind, LineKind::Position);
        assert_eq!(scan_line("vt 0.5 0.5").kind, LineKind::Texcoord);
        assert_eq!(scan_line("vn 0 1 0").kind, LineKind::Normal);
        assert_eq!(scan_line("f 1 2 3").kind, LineKind::Face);
        assert_eq!(scan_line("# comment").kind, LineKind::Comment);
        assert_eq!(scan_line("   \t\r").kind, LineKind::Blank);
        assert_eq!(scan_line("").kind, LineKind::Blank);
    }

    #[test]
    fn unknown_directives_keep_their_tag() {
        assert_eq!(scan_line("usemtl wood").kind, LineKind::Unknown("usemtl"));
        assert_eq!(scan_line("vp 0.1 0.2").kind, LineKind::Unknown("vp"));
        assert_eq!(scan_line("g").kind, LineKind::Unknown("g"));
    }

    #[test]
    fn tolerates_padding_and_tabs() {
        let line = scan_line("   v\t1.0   2.0 3.0  \r");
        assert_eq!(line.kind, LineKind::Position);
        assert_eq!(parse_floats::<3>(line.fields()), Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn parse_floats_rejects_short_or_bad_fields() {
        assert_eq!(parse_floats::<3>(scan_line("v 1 2").fields()), None);
        assert_eq!(parse_floats::<3>(scan_line("v 1 x 3").fields()), None);
        assert_eq!(
            parse_floats::<2>(scan_line("vt 0.25 0.75 0.0").fields()),
            Some([0.25, 0.75])
        );
        assert_eq!(
            parse_floats::<3>(scan_line("v 1e2 -2.5 .5 1.0").fields()),
            Some([100.0, -2.5, 0.5])
        );
    }
}
