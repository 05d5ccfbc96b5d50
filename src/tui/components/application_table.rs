//! Applications table component.
//!
//! Renders a header row and one fixed-width row per application, with a
//! cursor marker on the selected row and the status cell coloured by
//! review state.

use crossterm::style::Stylize;

use crate::service::{LoanApplication, LoanStatus};

use super::text_truncate::fit_to_width;
use super::value_format::{format_amount, format_json_value, format_local_timestamp};

/// Default visible height for the table body.
const DEFAULT_VISIBLE_HEIGHT: usize = 20;

/// Text shown in place of rows when the service returned an empty list.
pub const EMPTY_TABLE_MESSAGE: &str = "No loan applications found";

const COLUMN_SEPARATOR: &str = "  ";

/// Column titles and widths, in display order.
const COLUMNS: [(&str, usize); 9] = [
    ("Full Name", 18),
    ("Aadhar Number", 14),
    ("Bank Name", 14),
    ("Loan Amount", 12),
    ("Repayment Months", 16),
    ("Timestamp", 19),
    ("Warning", 16),
    ("Safe margin", 11),
    ("Loan Status", 11),
];

/// Context for rendering the applications table.
#[derive(Debug, Clone)]
pub struct ApplicationTableViewContext<'a> {
    /// Applications in service order.
    pub applications: &'a [LoanApplication],
    /// Selected row, or `None` to render without a cursor.
    pub cursor_position: Option<usize>,
    /// Index of the first rendered row.
    pub scroll_offset: usize,
    /// Maximum number of body rows; `0` renders every row.
    pub visible_height: usize,
    /// strftime layout for the timestamp column.
    pub timestamp_format: &'a str,
    /// Whether to colour the status column.
    pub styled: bool,
}

/// Component rendering the applications table.
#[derive(Debug, Clone)]
pub struct ApplicationTableComponent {
    visible_height: usize,
}

impl Default for ApplicationTableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationTableComponent {
    /// Creates a table with the default body height.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible_height: DEFAULT_VISIBLE_HEIGHT,
        }
    }

    /// Updates the number of body rows that fit on screen.
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
    }

    /// Number of body rows that fit on screen.
    #[must_use]
    pub const fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Renders the header followed by the visible window of rows.
    #[must_use]
    pub fn view(ctx: &ApplicationTableViewContext<'_>) -> String {
        let mut output = header_line();
        output.push('\n');

        if ctx.applications.is_empty() {
            output.push_str("  ");
            output.push_str(EMPTY_TABLE_MESSAGE);
            output.push('\n');
            return output;
        }

        let window = if ctx.visible_height == 0 {
            ctx.applications.len()
        } else {
            ctx.visible_height
        };

        for (index, application) in ctx
            .applications
            .iter()
            .enumerate()
            .skip(ctx.scroll_offset)
            .take(window)
        {
            let selected = ctx.cursor_position == Some(index);
            output.push_str(&format_row(application, selected, ctx));
            output.push('\n');
        }

        output
    }
}

/// Column titles padded to their widths.
#[must_use]
pub fn header_line() -> String {
    let titles: Vec<String> = COLUMNS
        .iter()
        .map(|(title, width)| fit_to_width(title, *width))
        .collect();
    format!("  {}", titles.join(COLUMN_SEPARATOR).trim_end())
}

fn format_row(
    application: &LoanApplication,
    selected: bool,
    ctx: &ApplicationTableViewContext<'_>,
) -> String {
    let values = [
        application.full_name.clone(),
        application.aadhar_number.to_string(),
        application.bank_name.clone(),
        format_amount(application.loan_amount),
        application
            .repayment_months
            .map(|months| months.to_string())
            .unwrap_or_default(),
        format_local_timestamp(application.timestamp.as_ref(), ctx.timestamp_format),
        format_json_value(&application.warning),
        format_json_value(&application.safe_margin),
    ];

    let mut cells: Vec<String> = values
        .iter()
        .zip(COLUMNS.iter())
        .map(|(value, (_, width))| fit_to_width(value, *width))
        .collect();
    cells.push(status_cell(application.loan_status, ctx.styled));

    let prefix = if selected { "> " } else { "  " };
    format!("{prefix}{}", cells.join(COLUMN_SEPARATOR))
}

fn status_cell(status: LoanStatus, styled: bool) -> String {
    let label = status.as_str();
    if !styled {
        return label.to_owned();
    }
    match status {
        LoanStatus::Approved => label.green().to_string(),
        LoanStatus::Rejected => label.red().to_string(),
        LoanStatus::Reverted | LoanStatus::Pending => label.yellow().to_string(),
    }
}
