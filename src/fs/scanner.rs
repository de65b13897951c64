use std::{
    fmt::Display,
    io::BufRead,
    str::FromStr,
};

/// Failure to load an instance from disk.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    /// The input ended while more tokens were expected.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse {
        token: String,
        type_name: &'static str,
    },
    /// The header declares an empty or non-square instance.
    InvalidDimensions(String),
    /// An edge names a node outside `0..n`.
    EdgeOutOfRange {
        from: usize,
        to: usize,
        num_nodes: usize,
    },
    /// The `.npy` payload could not be decoded.
    Npy(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse { token, type_name } => {
                write!(f, "Could not parse token '{token}' as type {type_name}")
            }
            Self::InvalidDimensions(reason) => write!(f, "Invalid dimensions: {reason}"),
            Self::EdgeOutOfRange {
                from,
                to,
                num_nodes,
            } => write!(f, "Edge {from} -> {to} is outside a graph of {num_nodes} nodes"),
            Self::Npy(reason) => write!(f, "Invalid npy file: {reason}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Whitespace token reader that skips `#` comments.
pub(crate) struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    pub(crate) fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Next token of the current line, refilling from the reader as needed.
    fn next_token(&mut self) -> Result<Option<&str>, LoadError> {
        loop {
            let line = &self.buf[self.pos..];
            let line = line.split('#').next().unwrap_or_default();
            let trimmed = line.trim_start();
            if !trimmed.is_empty() {
                let start = self.pos + (line.len() - trimmed.len());
                let len = trimmed
                    .find(char::is_whitespace)
                    .unwrap_or(trimmed.len());
                self.pos = start + len;
                return Ok(Some(&self.buf[start..start + len]));
            }

            self.buf.clear();
            self.pos = 0;
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
        }
    }

    /// Reads the next token and parses it into `T`.
    pub(crate) fn next<T: FromStr>(&mut self) -> Result<T, LoadError> {
        let token = self.next_token()?.ok_or(LoadError::UnexpectedEof)?;
        token.parse::<T>().map_err(|_| LoadError::Parse {
            token: token.to_owned(),
            type_name: std::any::type_name::<T>(),
        })
    }

    /// True once only whitespace and comments remain.
    pub(crate) fn is_exhausted(&mut self) -> Result<bool, LoadError> {
        Ok(self.next_token()?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_skip_comments_and_blank_lines() {
        let text = "# header\n3 2 # nodes edges\n\n  0 1 0.5\n";
        let mut scanner = Scanner::new(text.as_bytes());
        assert_eq!(scanner.next::<usize>().unwrap(), 3);
        assert_eq!(scanner.next::<usize>().unwrap(), 2);
        assert_eq!(scanner.next::<usize>().unwrap(), 0);
        assert_eq!(scanner.next::<usize>().unwrap(), 1);
        assert_eq!(scanner.next::<f64>().unwrap(), 0.5);
        assert!(scanner.is_exhausted().unwrap());
        assert!(matches!(scanner.next::<usize>(), Err(LoadError::UnexpectedEof)));
    }

    #[test]
    fn test_parse_error_names_token_and_type() {
        let mut scanner = Scanner::new("x1".as_bytes());
        match scanner.next::<usize>() {
            Err(LoadError::Parse { token, type_name }) => {
                assert_eq!(token, "x1");
                assert_eq!(type_name, "usize");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_comment_glued_to_token() {
        let mut scanner = Scanner::new("7#seven\n8".as_bytes());
        assert_eq!(scanner.next::<u32>().unwrap(), 7);
        assert_eq!(scanner.next::<u32>().unwrap(), 8);
    }
}
