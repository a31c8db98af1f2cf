//! User context assembly for the chat assistant.
//!
//! Pure formatting: recent reports and upcoming appointments become the
//! context block appended to the assistant's system message. Summaries are
//! only quoted when their analysis completed, truncated to a 200-character
//! prefix.

use chrono::{Datelike, NaiveDate};

use nirogya_types::appointment::Appointment;
use nirogya_types::report::{ProcessingStatus, RecentReport};

/// Maximum characters of a summary quoted in context.
const SUMMARY_PREFIX_CHARS: usize = 200;

/// Render `M/D/YYYY`, matching what the web UI shows users.
fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Build the context block from a user's recent reports and appointments.
///
/// Returns an empty string when there is nothing to say; never fails.
pub fn build_user_context(reports: &[RecentReport], appointments: &[Appointment]) -> String {
    let mut context = String::new();

    if !reports.is_empty() {
        context.push_str("\n\nUser's Recent Medical Reports:\n");
        for report in reports {
            context.push_str(&format!(
                "- {} (uploaded {})\n",
                report.file_name,
                short_date(report.uploaded_at.date_naive())
            ));
            if report.processing_status == Some(ProcessingStatus::Completed) {
                if let Some(summary) = &report.summary_text {
                    let prefix: String = summary.chars().take(SUMMARY_PREFIX_CHARS).collect();
                    context.push_str(&format!("  Summary: {prefix}...\n"));
                }
            }
        }
    }

    if !appointments.is_empty() {
        context.push_str("\n\nUser's Upcoming Appointments:\n");
        for apt in appointments {
            context.push_str(&format!(
                "- {} ({}) on {} at {}\n",
                apt.doctor_name,
                apt.specialty,
                short_date(apt.date),
                apt.time
            ));
            if let Some(notes) = &apt.notes {
                context.push_str(&format!("  Notes: {notes}\n"));
            }
        }
    }

    context
}
