//! The two fixed call sequences and their transcript layouts.

use std::fmt;
use std::str::FromStr;

use crate::client::CostManagerClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::{Category, NewCost, ReportQuery};

pub const USER_ID: &str = "123123";
pub const REPORT_YEAR: i32 = 2025;
pub const REPORT_MONTH: u32 = 2;

/// A line printed for a successful response, after the URL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Status,
    Content,
    Text,
    Json,
}

/// Labels and separators of one transcript flavour.
#[derive(Debug)]
pub struct Layout {
    pub preamble: &'static str,
    pub url: &'static str,
    pub status: &'static str,
    /// `None` when no step of the suite prints raw content.
    pub content: Option<&'static str>,
    pub text: &'static str,
    pub json: &'static str,
    /// Prefix of the failure line; followed by `{route}: {error}`.
    pub failure: &'static str,
    /// Written after every step but the last.
    pub separator: &'static str,
    /// Written after the last step.
    pub closing: &'static str,
}

impl Layout {
    pub fn label(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Status => Some(self.status),
            Field::Content => self.content,
            Field::Text => Some(self.text),
            Field::Json => Some(self.json),
        }
    }
}

static REPORT_LAYOUT: Layout = Layout {
    preamble: "__________________________________\n\n",
    url: "כתובת: ",
    status: "data.status_code=",
    content: Some("data.content="),
    text: "data.text=",
    json: "data.json()=",
    failure: "תקלה בנתיב ",
    separator: "\n",
    closing: "\n\n========== סיום הבדיקה ==========\n\n",
};

static USER_LOOKUP_LAYOUT: Layout = Layout {
    preamble: "========== בדיקת פרויקט Cost Manager ==========\n\n",
    url: "כתובת: ",
    status: "קוד סטטוס: ",
    content: None,
    text: "תוכן (טקסט): ",
    json: "תוכן (JSON): ",
    failure: "תקלה בנתיב ",
    separator: "\n------------------------------------------\n\n",
    closing: "\n========== סיום הבדיקה ==========\n\n",
};

const FULL_BODY: &[Field] = &[Field::Status, Field::Content, Field::Text, Field::Json];
const RAW_ONLY: &[Field] = &[Field::Status, Field::Content];
const DECODED: &[Field] = &[Field::Status, Field::Text, Field::Json];

/// One request of a suite together with how to print its response.
#[derive(Debug, Clone)]
pub struct Step {
    pub title: String,
    /// Dashed line written under the title, if any.
    pub underline: Option<&'static str>,
    /// Endpoint path without query string, used in failure lines.
    pub route: String,
    pub request: HttpRequest,
    pub fields: &'static [Field],
}

/// Which four-call sequence to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Suite {
    /// about, report, add, report; `data.*` field labels.
    #[default]
    Report,
    /// about, user lookup, add, report; Hebrew labels.
    UserLookup,
}

impl Suite {
    pub fn layout(self) -> &'static Layout {
        match self {
            Suite::Report => &REPORT_LAYOUT,
            Suite::UserLookup => &USER_LOOKUP_LAYOUT,
        }
    }

    /// Cost item posted in step 3.
    pub fn payload(self) -> NewCost {
        let (description, sum) = match self {
            Suite::Report => ("milk 9", 8),
            Suite::UserLookup => ("coffee 5", 5),
        };
        NewCost {
            userid: USER_ID.to_string(),
            description: description.to_string(),
            category: Category::Food,
            sum,
        }
    }

    pub fn report_query() -> ReportQuery {
        ReportQuery {
            id: USER_ID.to_string(),
            year: REPORT_YEAR,
            month: REPORT_MONTH,
        }
    }

    pub fn steps(self, client: &CostManagerClient) -> Result<Vec<Step>, ApiError> {
        let about = client.build_about();
        let report = client.build_report(&Self::report_query())?;
        let add = client.build_add_cost(&self.payload())?;

        let steps = match self {
            Suite::Report => vec![
                underlined("testing getting the about", 25, "/api/about", about, FULL_BODY),
                underlined("testing getting the report - 1", 30, "/api/report", report.clone(), FULL_BODY),
                underlined("testing adding cost item", 34, "/api/add", add, RAW_ONLY),
                underlined("testing getting the report - 2", 30, "/api/report", report, FULL_BODY),
            ],
            Suite::UserLookup => {
                let user_route = format!("/api/users/{USER_ID}");
                vec![
                    titled_by_route("/api/about", about),
                    titled_by_route(&user_route, client.build_user(USER_ID)),
                    titled_by_route("/api/add", add),
                    titled_by_route("/api/report", report),
                ]
            }
        };
        Ok(steps)
    }
}

const DASHES: &str = "----------------------------------";

fn underlined(
    title: &str,
    width: usize,
    route: &str,
    request: HttpRequest,
    fields: &'static [Field],
) -> Step {
    Step {
        title: title.to_string(),
        underline: Some(&DASHES[..width]),
        route: route.to_string(),
        request,
        fields,
    }
}

fn titled_by_route(route: &str, request: HttpRequest) -> Step {
    Step {
        title: format!("בדיקה של {route}:"),
        underline: None,
        route: route.to_string(),
        request,
        fields: DECODED,
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suite::Report => f.write_str("report"),
            Suite::UserLookup => f.write_str("user-lookup"),
        }
    }
}

impl FromStr for Suite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(Suite::Report),
            "user-lookup" => Ok(Suite::UserLookup),
            other => Err(format!("unknown suite `{other}` (expected report or user-lookup)")),
        }
    }
}
