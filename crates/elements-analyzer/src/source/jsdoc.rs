/// A block tag such as `@igxParent IgxGridComponent, *`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    /// Payload, continuation lines joined with a space.
    pub text: String,
}

/// Structured representation of a parsed JSDoc comment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedJsDoc {
    /// Summary text before any tags.
    pub summary: Option<String>,
    pub tags: Vec<JsDocTag>,
}

impl ParsedJsDoc {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Payload of the first tag called `name`.
    pub fn tag_text(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.text.as_str())
    }
}

/// Parse a JSDoc block (without comment delimiters) into summary and tags.
///
/// Lines that do not start a tag continue the previous tag, or the summary
/// when no tag has been seen yet.
pub fn parse_jsdoc(raw: &str) -> ParsedJsDoc {
    let mut summary_lines = Vec::new();
    let mut tags: Vec<JsDocTag> = Vec::new();

    for line in normalize_lines(raw) {
        if let Some(rest) = line.strip_prefix('@') {
            let (tag, payload) = split_tag_payload(rest);
            if !tag.is_empty() {
                tags.push(JsDocTag {
                    name: tag.to_string(),
                    text: payload.to_string(),
                });
                continue;
            }
        }

        match tags.last_mut() {
            Some(tag) if !line.is_empty() => {
                if !tag.text.is_empty() {
                    tag.text.push(' ');
                }
                tag.text.push_str(&line);
            }
            Some(_) => {}
            None => summary_lines.push(line),
        }
    }

    ParsedJsDoc {
        summary: compose_summary(summary_lines),
        tags,
    }
}

fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

fn compose_summary(lines: Vec<String>) -> Option<String> {
    let summary = lines
        .into_iter()
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>();
    if summary.is_empty() {
        None
    } else {
        Some(summary.join(" ").trim().to_string())
    }
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_parent_tag() {
        let doc = parse_jsdoc(
            "*\n * Column component.\n *\n * @igxParent IgxGridComponent, IgxTreeGridComponent, *\n ",
        );
        assert_eq!(doc.summary.as_deref(), Some("Column component."));
        assert_eq!(
            doc.tag_text("igxParent"),
            Some("IgxGridComponent, IgxTreeGridComponent, *")
        );
    }

    #[test]
    fn continuation_lines_extend_the_tag() {
        let doc = parse_jsdoc("* @igxParent IgxGridComponent,\n *   IgxRowIslandComponent\n * @hidden");
        assert_eq!(
            doc.tag_text("igxParent"),
            Some("IgxGridComponent, IgxRowIslandComponent")
        );
        assert!(doc.has_tag("hidden"));
        assert_eq!(doc.tag_text("hidden"), Some(""));
    }

    #[test]
    fn stray_at_sign_is_text() {
        let doc = parse_jsdoc("* @ not a tag");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.summary.as_deref(), Some("@ not a tag"));
    }
}
