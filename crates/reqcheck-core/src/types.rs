//! Core type definitions for reqcheck
//!
//! The blocking engine understands a fixed set of lowercase request types.
//! Browser tooling labels requests with capitalised vendor strings
//! (`CSS stylesheet`, `Fetch`, ...), which have to be translated before they
//! reach the engine.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::UnknownType;

// =============================================================================
// Unified Request Types (engine vocabulary)
// =============================================================================

/// Request type as consumed by the blocking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnifiedType {
    Beacon,
    CspReport,
    Document,
    Font,
    Image,
    Media,
    Object,
    Other,
    Ping,
    Script,
    Speculative,
    Stylesheet,
    SubFrame,
    WebManifest,
    Websocket,
    Xbl,
    XmlDtd,
    Xhr,
    Xslt,
}

impl UnifiedType {
    pub const ALL: [UnifiedType; 19] = [
        Self::Beacon,
        Self::CspReport,
        Self::Document,
        Self::Font,
        Self::Image,
        Self::Media,
        Self::Object,
        Self::Other,
        Self::Ping,
        Self::Script,
        Self::Speculative,
        Self::Stylesheet,
        Self::SubFrame,
        Self::WebManifest,
        Self::Websocket,
        Self::Xbl,
        Self::XmlDtd,
        Self::Xhr,
        Self::Xslt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beacon => "beacon",
            Self::CspReport => "csp_report",
            Self::Document => "document",
            Self::Font => "font",
            Self::Image => "image",
            Self::Media => "media",
            Self::Object => "object",
            Self::Other => "other",
            Self::Ping => "ping",
            Self::Script => "script",
            Self::Speculative => "speculative",
            Self::Stylesheet => "stylesheet",
            Self::SubFrame => "sub_frame",
            Self::WebManifest => "web_manifest",
            Self::Websocket => "websocket",
            Self::Xbl => "xbl",
            Self::XmlDtd => "xml_dtd",
            Self::Xhr => "xhr",
            Self::Xslt => "xslt",
        }
    }
}

impl FromStr for UnifiedType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

impl fmt::Display for UnifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Vendor Request Types (browser devtools labels)
// =============================================================================

/// Request type label reported by browser tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorType {
    Audio,
    Video,
    Media,
    Beacon,
    CspReport,
    CssStylesheet,
    Document,
    Subdocument,
    Dtd,
    Fetch,
    XmlHttpRequest,
    Font,
    Image,
    Imageset,
    Favicon,
    LinkPrefetch,
    Speculative,
    Object,
    ObjectSubrequest,
    Plugin,
    Ping,
    Script,
    WebManifest,
    WebSocket,
    Xbl,
    Xslt,
    Other,
}

impl VendorType {
    pub const ALL: [VendorType; 27] = [
        Self::Audio,
        Self::Video,
        Self::Media,
        Self::Beacon,
        Self::CspReport,
        Self::CssStylesheet,
        Self::Document,
        Self::Subdocument,
        Self::Dtd,
        Self::Fetch,
        Self::XmlHttpRequest,
        Self::Font,
        Self::Image,
        Self::Imageset,
        Self::Favicon,
        Self::LinkPrefetch,
        Self::Speculative,
        Self::Object,
        Self::ObjectSubrequest,
        Self::Plugin,
        Self::Ping,
        Self::Script,
        Self::WebManifest,
        Self::WebSocket,
        Self::Xbl,
        Self::Xslt,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Media => "Media",
            Self::Beacon => "Beacon",
            Self::CspReport => "CSP report",
            Self::CssStylesheet => "CSS stylesheet",
            Self::Document => "Document",
            Self::Subdocument => "Subdocument",
            Self::Dtd => "DTD",
            Self::Fetch => "Fetch",
            Self::XmlHttpRequest => "XMLHttpRequest",
            Self::Font => "Font",
            Self::Image => "Image",
            Self::Imageset => "Imageset",
            Self::Favicon => "Favicon",
            Self::LinkPrefetch => "Link prefetch resource",
            Self::Speculative => "Speculative",
            Self::Object => "Object",
            Self::ObjectSubrequest => "Object subrequest",
            Self::Plugin => "Plugin",
            Self::Ping => "Ping",
            Self::Script => "Script",
            Self::WebManifest => "Web manifest",
            Self::WebSocket => "WebSocket",
            Self::Xbl => "XBL",
            Self::Xslt => "XSLT",
            Self::Other => "Other",
        }
    }

    /// Engine type this label stands for.
    pub fn unified(self) -> UnifiedType {
        match self {
            Self::Audio | Self::Video | Self::Media => UnifiedType::Media,
            Self::Beacon => UnifiedType::Beacon,
            Self::CspReport => UnifiedType::CspReport,
            Self::CssStylesheet => UnifiedType::Stylesheet,
            Self::Document => UnifiedType::Document,
            Self::Subdocument => UnifiedType::SubFrame,
            Self::Dtd => UnifiedType::XmlDtd,
            Self::Fetch | Self::XmlHttpRequest => UnifiedType::Xhr,
            Self::Font => UnifiedType::Font,
            Self::Image | Self::Imageset | Self::Favicon => UnifiedType::Image,
            Self::LinkPrefetch | Self::Speculative => UnifiedType::Speculative,
            Self::Object | Self::ObjectSubrequest | Self::Plugin => UnifiedType::Object,
            Self::Ping => UnifiedType::Ping,
            Self::Script => UnifiedType::Script,
            Self::WebManifest => UnifiedType::WebManifest,
            Self::WebSocket => UnifiedType::Websocket,
            Self::Xbl => UnifiedType::Xbl,
            Self::Xslt => UnifiedType::Xslt,
            Self::Other => UnifiedType::Other,
        }
    }
}

impl FromStr for VendorType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

impl fmt::Display for VendorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a vendor label into the engine vocabulary.
///
/// Lookup is case-sensitive. Unified tokens and anything unrecognised are
/// returned unchanged; the engine decides what an unknown type means.
pub fn normalize(token: &str) -> &str {
    match token.parse::<VendorType>() {
        Ok(vendor) => vendor.unified().as_str(),
        Err(_) => token,
    }
}

/// Every token accepted as a request type, unified first.
pub fn all_tokens() -> impl Iterator<Item = &'static str> {
    UnifiedType::ALL
        .into_iter()
        .map(UnifiedType::as_str)
        .chain(VendorType::ALL.into_iter().map(VendorType::as_str))
}

// =============================================================================
// Check Record
// =============================================================================

/// A single request to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    /// Request URL
    pub url: String,
    /// URL of the page that issued the request
    pub context: String,
    /// Request type as supplied, vendor or unified
    pub request_type: String,
}

impl CheckRecord {
    pub fn new(
        url: impl Into<String>,
        context: impl Into<String>,
        request_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            context: context.into(),
            request_type: request_type.into(),
        }
    }

    /// Request type in the engine vocabulary.
    pub fn unified_type(&self) -> &str {
        normalize(&self.request_type)
    }
}

// =============================================================================
// Check Detail
// =============================================================================

/// Full engine verdict for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckDetail {
    pub matched: bool,
    pub important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_url: Option<String>,
    /// Exception rule that overrode a block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    /// Rule that matched (raw text when rules were loaded in debug mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}
