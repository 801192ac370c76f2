//! Line-oriented INI patching.
//!
//! Content is kept as the original lines, each with its own terminator, so
//! rendering an unmodified document gives back the exact input. Nothing is
//! parsed into sections; every lookup is a scan over the raw lines.

/// What to do with a header that is missing when a key has to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSection {
    /// Put `[section]` and the line at the very top of the file.
    Prepend,
    /// Put a blank line, `[section]` and the line at the end of the file.
    Append,
}

/// Per-line decision for [`IniLines::edit_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    Keep,
    Replace(String),
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniLines {
    lines: Vec<String>,
    newline: &'static str,
}

impl Default for IniLines {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            newline: "\n",
        }
    }
}

impl IniLines {
    pub fn parse(text: &str) -> Self {
        let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
            newline,
        }
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| strip_terminator(line))
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| strip_terminator(line))
    }

    /// First line carrying `key=`, anywhere in the file.
    ///
    /// The scan ignores section boundaries, so a key of the same name in a
    /// later section is found just the same.
    pub fn find_key_unscoped(&self, key: &str) -> Option<usize> {
        self.lines.iter().position(|line| key_matches(line, key))
    }

    /// Last line carrying `key=`, anywhere in the file.
    pub fn find_last_key_unscoped(&self, key: &str) -> Option<usize> {
        self.lines.iter().rposition(|line| key_matches(line, key))
    }

    /// Text after the first `=` of the first line carrying `key=`.
    pub fn value_unscoped(&self, key: &str) -> Option<&str> {
        let index = self.find_key_unscoped(key)?;
        let line = strip_terminator(&self.lines[index]).trim();
        line.split_once('=').map(|(_, value)| value)
    }

    pub fn first_header(&self, section: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| header_matches(line, section))
    }

    pub fn last_header(&self, section: &str) -> Option<usize> {
        self.lines
            .iter()
            .rposition(|line| header_matches(line, section))
    }

    /// Index one past the last line of the section whose header sits at
    /// `header`: the next header line, or the end of the file.
    pub fn section_end(&self, header: usize) -> usize {
        self.lines
            .iter()
            .enumerate()
            .skip(header + 1)
            .find(|(_, line)| line.trim().starts_with('['))
            .map(|(index, _)| index)
            .unwrap_or(self.lines.len())
    }

    pub fn replace(&mut self, index: usize, content: &str) {
        self.lines[index] = self.terminated(content);
    }

    pub fn insert(&mut self, index: usize, content: &str) {
        if index >= self.lines.len() {
            self.push(content);
            return;
        }
        let line = self.terminated(content);
        self.lines.insert(index, line);
    }

    /// Appends a line, terminating an unterminated last line first.
    pub fn push(&mut self, content: &str) {
        if let Some(last) = self.lines.last_mut() {
            if !last.ends_with('\n') {
                last.push_str(self.newline);
            }
        }
        let line = self.terminated(content);
        self.lines.push(line);
    }

    /// Replaces the last `key=` line in place, otherwise adds `line` right
    /// after the last `[section]` header, otherwise creates the header.
    pub fn upsert(&mut self, key: &str, line: &str, section: &str, missing: MissingSection) {
        if let Some(index) = self.find_last_key_unscoped(key) {
            self.replace(index, line);
            return;
        }

        if let Some(header) = self.last_header(section) {
            self.insert(header + 1, line);
            return;
        }

        let header = format!("[{section}]");
        match missing {
            MissingSection::Prepend => {
                self.lines.insert(0, self.terminated(&header));
                self.lines.insert(1, self.terminated(line));
            }
            MissingSection::Append => {
                self.push("");
                self.push(&header);
                self.push(line);
            }
        }
    }

    /// Drops every section, header through body, whose header equals one of
    /// `headers` (full bracketed text, compared case-insensitively).
    pub fn remove_sections(&mut self, headers: &[String]) -> usize {
        let wanted: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect();
        let mut dropping = false;
        let mut removed = 0;
        self.edit_lines(|line| {
            if is_header(line) {
                dropping = wanted.contains(&line.trim().to_lowercase());
                if dropping {
                    removed += 1;
                }
            }
            if dropping {
                LineEdit::Drop
            } else {
                LineEdit::Keep
            }
        });
        removed
    }

    /// Visits every line once, top to bottom, and applies the returned edit.
    pub fn edit_lines<F>(&mut self, mut decide: F)
    where
        F: FnMut(&str) -> LineEdit,
    {
        let lines = std::mem::take(&mut self.lines);
        let mut kept = Vec::with_capacity(lines.len());
        for line in lines {
            match decide(strip_terminator(&line)) {
                LineEdit::Keep => kept.push(line),
                LineEdit::Replace(content) => kept.push(self.terminated(&content)),
                LineEdit::Drop => {}
            }
        }
        self.lines = kept;
    }

    fn terminated(&self, content: &str) -> String {
        format!("{content}{}", self.newline)
    }
}

/// True when the trimmed line starts with `key=`, ignoring case.
pub fn key_matches(line: &str, key: &str) -> bool {
    let prefix = format!("{}=", key.to_lowercase());
    line.trim().to_lowercase().starts_with(&prefix)
}

/// True when the trimmed line is exactly `[section]`, ignoring case.
pub fn header_matches(line: &str, section: &str) -> bool {
    line.trim().to_lowercase() == format!("[{}]", section.to_lowercase())
}

pub fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}
