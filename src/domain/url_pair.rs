//! Bare / `www.` URL pair decomposition.
//!
//! Every curated URL is stored twice: once as submitted and once as its
//! sibling, the same address with the `www.` host prefix added or removed.
//! A URL is read as `scheme://[www.]rest` where `scheme` is `http` or `https`
//! and `rest` is everything after the optional `www.` prefix, kept verbatim
//! so sibling lookups stay exact string matches.
//!
//! # Examples
//!
//! ```ignore
//! let parts = UrlParts::parse("https://example.com/about")?;
//! assert_eq!(parts.sibling(), "https://www.example.com/about");
//! ```

use url::Url;

/// Errors raised while validating or decomposing a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    /// The value does not fit `http(s)://[www.]host...`.
    #[error("URL must look like http(s)://[www.]example.com")]
    Malformed { url: String },

    /// The value is not an absolute URL with a host.
    #[error("The URL scheme is not correct! Example: https://www.example.com")]
    InvalidSyntax { url: String },

    /// The `HEAD` probe failed or answered with a status >= 400.
    #[error("The URL does not exist")]
    Unreachable { url: String },
}

impl UrlError {
    /// Stable identifier exposed in API error details.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed_url",
            Self::InvalidSyntax { .. } => "invalid_url_syntax",
            Self::Unreachable { .. } => "url_unreachable",
        }
    }

    /// The offending URL.
    pub fn url(&self) -> &str {
        match self {
            Self::Malformed { url } | Self::InvalidSyntax { url } | Self::Unreachable { url } => {
                url
            }
        }
    }
}

/// Whether the host carries the `www.` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostForm {
    Bare,
    Www,
}

/// A URL split into scheme, host form and the remainder after `www.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub rest: String,
    pub form: HostForm,
}

const WWW_PREFIX: &str = "www.";

impl UrlParts {
    /// Splits a URL, picking the host form from the URL itself.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Malformed`] when the URL does not fit the pattern.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let after = scheme_remainder(input)?.1;
        let form = if after.starts_with(WWW_PREFIX) {
            HostForm::Www
        } else {
            HostForm::Bare
        };
        Self::parse_as(input, form)
    }

    /// Splits a URL using the rule of an already chosen host form.
    ///
    /// With [`HostForm::Bare`] nothing is stripped, so a `www.` URL keeps its
    /// prefix inside `rest`. With [`HostForm::Www`] the prefix is mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Malformed`] when the URL does not fit the rule.
    pub fn parse_as(input: &str, form: HostForm) -> Result<Self, UrlError> {
        let malformed = || UrlError::Malformed {
            url: input.to_string(),
        };

        let (scheme, after) = scheme_remainder(input)?;

        let rest = match form {
            HostForm::Www => after.strip_prefix(WWW_PREFIX).ok_or_else(malformed)?,
            HostForm::Bare => after,
        };

        // The remainder must still name a dotted host.
        if !rest.contains('.') || rest.starts_with('.') {
            return Err(malformed());
        }

        Ok(Self {
            scheme: scheme.to_string(),
            rest: rest.to_string(),
            form,
        })
    }

    /// The URL without the `www.` prefix.
    pub fn bare(&self) -> String {
        format!("{}://{}", self.scheme, self.rest)
    }

    /// The URL with the `www.` prefix.
    pub fn www(&self) -> String {
        format!("{}://{}{}", self.scheme, WWW_PREFIX, self.rest)
    }

    /// The counterpart of the parsed URL.
    pub fn sibling(&self) -> String {
        match self.form {
            HostForm::Bare => self.www(),
            HostForm::Www => self.bare(),
        }
    }
}

/// A rename applied to a stored URL, matched by exact string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingRename {
    pub from: String,
    pub to: String,
}

/// Computes the renames that move a stored pair from `old_url` to `new_url`.
///
/// The host form is taken from `old_url` alone and applied to both values.
/// The first rename targets the bare key, the second the `www.` key; the
/// primary record is always one of them.
///
/// # Errors
///
/// Returns [`UrlError::Malformed`] if either value does not fit the form
/// chosen from `old_url`.
pub fn pair_renames(old_url: &str, new_url: &str) -> Result<[SiblingRename; 2], UrlError> {
    let old = UrlParts::parse(old_url)?;
    let new = UrlParts::parse_as(new_url, old.form)?;

    Ok([
        SiblingRename {
            from: old.bare(),
            to: new.bare(),
        },
        SiblingRename {
            from: old.www(),
            to: new.www(),
        },
    ])
}

/// Checks that `input` is an absolute URL with a host.
///
/// Whitespace and control characters are refused, so the value probed is the
/// value stored.
///
/// # Errors
///
/// Returns [`UrlError::InvalidSyntax`] otherwise.
pub fn check_syntax(input: &str) -> Result<Url, UrlError> {
    let invalid = || UrlError::InvalidSyntax {
        url: input.to_string(),
    };

    if has_unencoded_chars(input) {
        return Err(invalid());
    }

    let parsed = Url::parse(input).map_err(|_| invalid())?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(invalid()),
    }
}

/// Returns the raw scheme and the text after `://`.
fn scheme_remainder(input: &str) -> Result<(&str, &str), UrlError> {
    let malformed = || UrlError::Malformed {
        url: input.to_string(),
    };

    if has_unencoded_chars(input) {
        return Err(malformed());
    }

    let parsed = Url::parse(input).map_err(|_| malformed())?;
    if parsed.host_str().is_none() || !parsed.username().is_empty() || parsed.password().is_some()
    {
        return Err(malformed());
    }

    let (scheme, after) = input.split_once("://").ok_or_else(malformed)?;
    match scheme {
        "http" | "https" => Ok((scheme, after)),
        _ => Err(malformed()),
    }
}

fn has_unencoded_chars(input: &str) -> bool {
    input.chars().any(|c| c.is_whitespace() || c.is_control())
}
