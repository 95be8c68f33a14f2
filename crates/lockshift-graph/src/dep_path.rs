//! Dependency paths, the keys of the pnpm snapshot graph.
//!
//! pnpm spells the same artifact in several ways depending on lockfile
//! version and where the reference appears:
//!
//! | Shape                    | Example                                   |
//! |--------------------------|-------------------------------------------|
//! | registry, v5             | `/@babel/core/7.12.0`                     |
//! | registry, v6             | `/@babel/core@7.12.0`                     |
//! | peer-qualified, v5       | `/react-dom/17.0.2_react@17.0.2`          |
//! | peer-qualified, v6       | `/react-dom@17.0.2(react@17.0.2)`         |
//! | bare version             | `17.0.2` (qualified with the edge name)   |
//! | git / remote             | `github.com/user/repo/0123abcd`           |
//! | local                    | `link:../shared`, `file:../vendor.tgz`    |
//!
//! [`DepPath::parse`] turns any of these into one structural value so the v5
//! and v6 spellings of a registry artifact compare equal.

use std::fmt;

use thiserror::Error;

use crate::error::{ConvertError, Result};

/// Why an identifier could not be read as a dependency path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepPathError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier contains whitespace")]
    Whitespace,

    #[error("missing or invalid package name")]
    MissingName,

    #[error("missing version")]
    MissingVersion,

    #[error("missing git reference")]
    MissingReference,

    #[error("unrecognized identifier shape")]
    Unrecognized,
}

type ParseResult<T> = std::result::Result<T, DepPathError>;

/// Canonical key of one concrete package instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DepPath {
    Registry {
        name: String,
        version: String,
    },
    Git {
        url: String,
        reference: String,
    },
    /// `link:` or `file:` specifier, kept verbatim.
    Link {
        path: String,
    },
    /// A base path plus the raw peer suffix, delimiter included
    /// (`_react@17.0.2` or `(react@17.0.2)`).
    PeerQualified {
        base: Box<DepPath>,
        peers: String,
    },
}

impl DepPath {
    pub fn registry(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Registry {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse a raw dependency path.
    ///
    /// Bare versions are not paths; use [`normalize`] when the edge name is
    /// known.
    pub fn parse(raw: &str) -> ParseResult<Self> {
        if raw.is_empty() {
            return Err(DepPathError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(DepPathError::Whitespace);
        }
        if raw.starts_with("link:") || raw.starts_with("file:") {
            if raw.len() == "link:".len() {
                return Err(DepPathError::Unrecognized);
            }
            return Ok(Self::Link {
                path: raw.to_string(),
            });
        }
        if let Some(rest) = raw.strip_prefix('/') {
            return parse_registry(rest);
        }
        if is_remote(raw) {
            return parse_remote(raw);
        }
        Err(DepPathError::Unrecognized)
    }

    /// Package name encoded in the path, if the shape carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Registry { name, .. } => Some(name),
            Self::PeerQualified { base, .. } => base.name(),
            Self::Git { .. } | Self::Link { .. } => None,
        }
    }

    /// Version for registry paths, reference for git, specifier for links.
    pub fn version(&self) -> &str {
        match self {
            Self::Registry { version, .. } => version,
            Self::Git { reference, .. } => reference,
            Self::Link { path } => path,
            Self::PeerQualified { base, .. } => base.version(),
        }
    }

    /// The path with any peer suffix removed.
    pub fn base(&self) -> &DepPath {
        match self {
            Self::PeerQualified { base, .. } => base.base(),
            other => other,
        }
    }

    pub fn peers(&self) -> Option<&str> {
        match self {
            Self::PeerQualified { peers, .. } => Some(peers),
            _ => None,
        }
    }

    fn with_peers(self, peers: String) -> Self {
        if peers.is_empty() {
            self
        } else {
            Self::PeerQualified {
                base: Box::new(self),
                peers,
            }
        }
    }
}

impl fmt::Display for DepPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry { name, version } => write!(f, "/{name}/{version}"),
            Self::Git { url, reference } => {
                if url.contains("://") || url.starts_with("git@") || url.starts_with("git+") {
                    write!(f, "{url}#{reference}")
                } else {
                    write!(f, "{url}/{reference}")
                }
            }
            Self::Link { path } => f.write_str(path),
            Self::PeerQualified { base, peers } => write!(f, "{base}{peers}"),
        }
    }
}

/// Turn an edge `(name, identifier)` into the dependency path it refers to.
///
/// The identifier is first read as a path on its own; when that fails it is
/// treated as a version of `name` and qualified as `/name/identifier`.
pub fn normalize(name: &str, identifier: &str) -> Result<DepPath> {
    DepPath::parse(identifier)
        .or_else(|_| DepPath::parse(&format!("/{name}/{identifier}")))
        .map_err(|err| ConvertError::MalformedIdentifier {
            name: name.to_string(),
            identifier: identifier.to_string(),
            reason: err.to_string(),
        })
}

fn parse_registry(rest: &str) -> ParseResult<DepPath> {
    let (body, paren_peers) = split_paren_peers(rest);
    let (prefix, segment) = match body.rfind('/') {
        Some(i) => (&body[..i], &body[i + 1..]),
        None => ("", body),
    };

    let (name, version, underscore_peers) = if validate_name(prefix).is_ok() {
        // v5: `name/version[_peers]`
        match segment.find('_') {
            Some(i) => (prefix.to_string(), &segment[..i], &segment[i..]),
            None => (prefix.to_string(), segment, ""),
        }
    } else {
        // v6: `[@scope/]name@version`
        let at = segment
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '@')
            .map(|(i, _)| i);
        let Some(i) = at else {
            return Err(if prefix.is_empty() {
                DepPathError::MissingVersion
            } else {
                DepPathError::MissingName
            });
        };
        let name = if prefix.is_empty() {
            segment[..i].to_string()
        } else {
            format!("{prefix}/{}", &segment[..i])
        };
        (name, &segment[i + 1..], "")
    };

    validate_name(&name)?;
    if version.is_empty() || version.contains('/') {
        return Err(DepPathError::MissingVersion);
    }

    let peers = format!("{underscore_peers}{paren_peers}");
    Ok(DepPath::registry(name, version).with_peers(peers))
}

fn parse_remote(raw: &str) -> ParseResult<DepPath> {
    let (body, peers) = split_paren_peers(raw);
    let (url, reference) = body
        .rsplit_once('#')
        .or_else(|| body.rsplit_once('/'))
        .ok_or(DepPathError::Unrecognized)?;
    if url.is_empty() {
        return Err(DepPathError::Unrecognized);
    }
    if reference.is_empty() {
        return Err(DepPathError::MissingReference);
    }
    let base = DepPath::Git {
        url: url.to_string(),
        reference: reference.to_string(),
    };
    Ok(base.with_peers(peers.to_string()))
}

fn split_paren_peers(raw: &str) -> (&str, &str) {
    match raw.find('(') {
        Some(i) => (&raw[..i], &raw[i..]),
        None => (raw, ""),
    }
}

fn is_remote(raw: &str) -> bool {
    const SCHEMES: &[&str] = &["git+", "git:", "git@", "http://", "https://"];
    if SCHEMES.iter().any(|scheme| raw.starts_with(scheme)) {
        return true;
    }
    // host-qualified form such as `github.com/user/repo/sha`
    raw.split_once('/').is_some_and(|(host, _)| {
        host.contains('.')
            && host.chars().any(|c| c.is_ascii_alphabetic())
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
    })
}

fn validate_name(name: &str) -> ParseResult<()> {
    let valid = match name.strip_prefix('@') {
        Some(scoped) => scoped
            .split_once('/')
            .is_some_and(|(scope, pkg)| !scope.is_empty() && !pkg.is_empty() && !pkg.contains('/')),
        None => !name.is_empty() && !name.contains('/'),
    };
    if valid {
        Ok(())
    } else {
        Err(DepPathError::MissingName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(name: &str, version: &str) -> DepPath {
        DepPath::registry(name, version)
    }

    #[test]
    fn test_parse_v5_registry_paths() {
        assert_eq!(DepPath::parse("/lodash/4.17.21").unwrap(), registry("lodash", "4.17.21"));
        assert_eq!(
            DepPath::parse("/@babel/core/7.12.0").unwrap(),
            registry("@babel/core", "7.12.0")
        );
    }

    #[test]
    fn test_parse_v6_registry_paths() {
        assert_eq!(DepPath::parse("/lodash@4.17.21").unwrap(), registry("lodash", "4.17.21"));
        assert_eq!(
            DepPath::parse("/@babel/core@7.12.0").unwrap(),
            registry("@babel/core", "7.12.0")
        );
    }

    #[test]
    fn test_v5_and_v6_spellings_are_equal() {
        assert_eq!(
            DepPath::parse("/@types/node/18.0.0").unwrap(),
            DepPath::parse("/@types/node@18.0.0").unwrap()
        );
        assert_eq!(
            DepPath::parse("/string_decoder/1.3.0").unwrap(),
            DepPath::parse("/string_decoder@1.3.0").unwrap()
        );
    }

    #[test]
    fn test_parse_peer_suffixes() {
        let v5 = DepPath::parse("/react-dom/17.0.2_react@17.0.2").unwrap();
        assert_eq!(v5.base(), &registry("react-dom", "17.0.2"));
        assert_eq!(v5.peers(), Some("_react@17.0.2"));
        assert_eq!(v5.version(), "17.0.2");

        let scoped = DepPath::parse("/styled/5.0.0_@types+react@17.0.2").unwrap();
        assert_eq!(scoped.name(), Some("styled"));
        assert_eq!(scoped.peers(), Some("_@types+react@17.0.2"));

        let v6 = DepPath::parse("/react-dom@17.0.2(react@17.0.2)").unwrap();
        assert_eq!(v6.base(), &registry("react-dom", "17.0.2"));
        assert_eq!(v6.peers(), Some("(react@17.0.2)"));
    }

    #[test]
    fn test_parse_git_and_links() {
        let git = DepPath::parse("github.com/user/repo/0123abcd").unwrap();
        assert_eq!(
            git,
            DepPath::Git {
                url: "github.com/user/repo".to_string(),
                reference: "0123abcd".to_string(),
            }
        );
        assert_eq!(git.to_string(), "github.com/user/repo/0123abcd");

        let hashed = DepPath::parse("git+https://github.com/user/repo.git#v1.0.0").unwrap();
        assert_eq!(hashed.version(), "v1.0.0");
        assert_eq!(hashed.to_string(), "git+https://github.com/user/repo.git#v1.0.0");

        assert_eq!(
            DepPath::parse("link:../shared").unwrap(),
            DepPath::Link {
                path: "link:../shared".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(DepPath::parse(""), Err(DepPathError::Empty));
        assert_eq!(DepPath::parse("/a b/1.0.0"), Err(DepPathError::Whitespace));
        assert_eq!(DepPath::parse("/lodash"), Err(DepPathError::MissingVersion));
        assert_eq!(DepPath::parse("/@scope/1.0.0"), Err(DepPathError::MissingName));
        assert_eq!(DepPath::parse("1.0.0"), Err(DepPathError::Unrecognized));
    }

    #[test]
    fn test_normalize_qualifies_bare_versions() {
        assert_eq!(normalize("lodash", "4.17.21").unwrap(), registry("lodash", "4.17.21"));
        assert_eq!(
            normalize("@scope/pkg", "1.0.0").unwrap(),
            registry("@scope/pkg", "1.0.0")
        );
        let peered = normalize("react-dom", "17.0.2_react@17.0.2").unwrap();
        assert_eq!(peered, DepPath::parse("/react-dom/17.0.2_react@17.0.2").unwrap());
        let v6 = normalize("react-dom", "17.0.2(react@17.0.2)").unwrap();
        assert_eq!(v6, DepPath::parse("/react-dom@17.0.2(react@17.0.2)").unwrap());
    }

    #[test]
    fn test_normalize_keeps_full_paths() {
        // aliased edge: the identifier names a different package
        assert_eq!(
            normalize("string-width-cjs", "/string-width/4.2.3").unwrap(),
            registry("string-width", "4.2.3")
        );
    }

    #[test]
    fn test_normalize_reports_malformed() {
        let err = normalize("pkg", "").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedIdentifier { ref name, .. } if name == "pkg"));
        assert!(normalize("pkg", "1.0 .0").is_err());
    }
}
