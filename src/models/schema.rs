use serde::{Deserialize, Serialize};

/// Column layout of the data file.
///
/// `Legacy` is the original three-column format, `Current` adds the
/// free-text trip reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Legacy,
    #[default]
    Current,
}

const ALL: [Schema; 2] = [Schema::Legacy, Schema::Current];

const LEGACY_HEADERS: [&str; 3] = ["Date", "Location", "Number"];
const CURRENT_HEADERS: [&str; 4] = ["Date", "Location", "Miles", "Trip Reason"];

impl Schema {
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Schema::Legacy => &LEGACY_HEADERS,
            Schema::Current => &CURRENT_HEADERS,
        }
    }

    pub fn columns(&self) -> usize {
        self.headers().len()
    }

    /// Name of the last column; a header whose trailing column differs
    /// from this one needs to be rewritten.
    pub fn trailing_header(&self) -> &'static str {
        let headers = self.headers();
        headers[headers.len() - 1]
    }

    pub fn has_reason(&self) -> bool {
        matches!(self, Schema::Current)
    }

    /// True when `header` satisfies this schema: enough columns and the
    /// expected trailing column in place.
    pub fn accepts_header<S: AsRef<str>>(&self, header: &[S]) -> bool {
        let n = self.columns();
        header.len() >= n && header[n - 1].as_ref().trim() == self.trailing_header()
    }

    /// True when `header` belongs to a wider schema than this one. Such a
    /// file must not be narrowed, since that would drop whole columns.
    pub fn header_is_newer<S: AsRef<str>>(&self, header: &[S]) -> bool {
        ALL.iter()
            .any(|s| s.columns() > self.columns() && s.accepts_header(header))
    }
}
