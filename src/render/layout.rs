//! Fixed page layout
//!
//! Strict vertical flow of fixed-height boxes on an A4-shaped canvas at
//! 6 px/mm. The footer is anchored from the page bottom independently of
//! everything above it; overflow is prevented by field truncation, never by
//! moving the footer.

use chrono::{DateTime, Utc};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::types::{ReceiptRecord, ReceiptStatus, SubmissionStatus};

use super::i18n::Strings;
use super::text::{draw_string, truncate_field, Align};
use super::{currency, ReceiptRenderer};

// Page geometry, px at 6 px/mm on A4 portrait.
pub(crate) const PAGE_WIDTH: u32 = 1260;
pub(crate) const PAGE_HEIGHT: u32 = 1782;
const MARGIN: i32 = 120;
const CONTENT_WIDTH: i32 = PAGE_WIDTH as i32 - 2 * MARGIN;

// Character budgets for free-text fields.
const BUDGET_ACCOUNT_NAME: usize = 50;
const BUDGET_BANK_NAME: usize = 45;
const BUDGET_BENEFICIARY_NAME: usize = 55;
const BUDGET_CONCEPT: usize = 110;
const BUDGET_REFERENCE: usize = 25;

// Palette.
const NAVY: Rgba<u8> = Rgba([0, 82, 147, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LABEL_GRAY: Rgba<u8> = Rgba([100, 100, 100, 255]);
const DARK_GRAY: Rgba<u8> = Rgba([60, 60, 60, 255]);
const BAND_GRAY: Rgba<u8> = Rgba([245, 245, 245, 255]);
const BORDER_GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]);
const STAMP_GRAY: Rgba<u8> = Rgba([150, 150, 150, 255]);
const AMOUNT_LABEL: Rgba<u8> = Rgba([200, 220, 255, 255]);
const PALE_BLUE: Rgba<u8> = Rgba([240, 248, 255, 255]);
const BROWN: Rgba<u8> = Rgba([139, 90, 43, 255]);
const PALE_GOLD: Rgba<u8> = Rgba([255, 252, 240, 255]);
const GOLD_BORDER: Rgba<u8> = Rgba([210, 180, 120, 255]);
const GREEN: Rgba<u8> = Rgba([0, 128, 0, 255]);
const PALE_GREEN: Rgba<u8> = Rgba([245, 255, 245, 255]);
const GREEN_BORDER: Rgba<u8> = Rgba([100, 180, 100, 255]);

/// The status shown on the badge: the transient submission state when the
/// caller supplied one, otherwise the lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BadgeStatus {
    Lifecycle(ReceiptStatus),
    Submission(SubmissionStatus),
}

impl BadgeStatus {
    pub(crate) fn of(record: &ReceiptRecord) -> BadgeStatus {
        match record.submission_status {
            Some(s) => BadgeStatus::Submission(s),
            None => BadgeStatus::Lifecycle(record.status),
        }
    }

    pub(crate) fn label(self, t: &'static Strings) -> &'static str {
        match self {
            BadgeStatus::Submission(SubmissionStatus::Completed) => t.completed,
            BadgeStatus::Submission(SubmissionStatus::Pending) => t.pending,
            BadgeStatus::Submission(SubmissionStatus::Processing) => t.processing,
            BadgeStatus::Submission(SubmissionStatus::Signed) => t.signed,
            BadgeStatus::Submission(SubmissionStatus::Submitted) => t.submitted,
            BadgeStatus::Lifecycle(ReceiptStatus::Generated) => t.generated,
            BadgeStatus::Lifecycle(ReceiptStatus::Downloaded) => t.downloaded,
            BadgeStatus::Lifecycle(ReceiptStatus::Archived) => t.archived,
        }
    }
}

/// Badge color for a status. Total over both status families.
pub(crate) fn status_color(status: BadgeStatus) -> Rgba<u8> {
    let rgb = match status {
        BadgeStatus::Submission(SubmissionStatus::Completed) => [0, 128, 0],
        BadgeStatus::Submission(SubmissionStatus::Pending) => [255, 140, 0],
        BadgeStatus::Submission(SubmissionStatus::Processing) => [30, 144, 255],
        BadgeStatus::Submission(SubmissionStatus::Signed) => [75, 0, 130],
        BadgeStatus::Submission(SubmissionStatus::Submitted) => [0, 128, 128],
        BadgeStatus::Lifecycle(ReceiptStatus::Generated) => [30, 144, 255],
        BadgeStatus::Lifecycle(ReceiptStatus::Downloaded) => [0, 128, 0],
        BadgeStatus::Lifecycle(ReceiptStatus::Archived) => [108, 117, 125],
    };
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

fn fill(canvas: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Rgba<u8>) {
    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w, h), color);
}

fn outline(canvas: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Rgba<u8>) {
    draw_hollow_rect_mut(canvas, Rect::at(x, y).of_size(w, h), color);
}

fn hline(canvas: &mut RgbaImage, y: i32, color: Rgba<u8>, thickness: u32) {
    fill(canvas, MARGIN, y, CONTENT_WIDTH as u32, thickness, color);
}

impl ReceiptRenderer {
    /// Paint the full document for `record` into a fresh canvas.
    pub(crate) fn paint(
        &self,
        record: &ReceiptRecord,
        t: &'static Strings,
        generated_at: DateTime<Utc>,
    ) -> RgbaImage {
        let fonts = &self.fonts;
        let mut canvas = RgbaImage::from_pixel(PAGE_WIDTH, PAGE_HEIGHT, WHITE);
        let center_x = PAGE_WIDTH as i32 / 2;
        let right_x = PAGE_WIDTH as i32 - MARGIN - 30;

        // Top accent bar and bank header.
        fill(&mut canvas, 0, 0, PAGE_WIDTH, 48, NAVY);
        draw_string(
            &mut canvas,
            NAVY,
            center_x,
            84,
            46.0,
            &fonts.sans_bold,
            &self.config.bank_name,
            Align::Center,
        );
        draw_string(
            &mut canvas,
            LABEL_GRAY,
            center_x,
            140,
            21.0,
            &fonts.sans,
            t.subtitle,
            Align::Center,
        );

        // Title band with receipt number and date on the right.
        fill(&mut canvas, MARGIN, 240, CONTENT_WIDTH as u32, 72, BAND_GRAY);
        fill(&mut canvas, MARGIN, 240, 4, 72, NAVY);
        fill(&mut canvas, MARGIN, 309, CONTENT_WIDTH as u32, 3, NAVY);
        draw_string(
            &mut canvas,
            NAVY,
            MARGIN + 30,
            258,
            30.0,
            &fonts.sans_bold,
            t.title,
            Align::Left,
        );

        let receipt_no: String = {
            let chars: Vec<char> = record.transfer_id.chars().collect();
            let tail = chars.len().saturating_sub(12);
            chars[tail..].iter().collect::<String>().to_uppercase()
        };
        draw_string(
            &mut canvas,
            DARK_GRAY,
            right_x,
            248,
            19.0,
            &fonts.sans,
            &format!("{} {}", t.receipt_no, receipt_no),
            Align::Right,
        );
        let date_line = match record.transfer_time {
            Some(time) => format!("{} | {}", record.transfer_date, time.format("%H:%M:%S")),
            None => record.transfer_date.to_string(),
        };
        draw_string(
            &mut canvas,
            DARK_GRAY,
            right_x,
            278,
            19.0,
            &fonts.sans,
            &date_line,
            Align::Right,
        );

        // Amount banner with status badge.
        fill(&mut canvas, MARGIN, 360, CONTENT_WIDTH as u32, 168, NAVY);
        draw_string(
            &mut canvas,
            AMOUNT_LABEL,
            MARGIN + 60,
            390,
            21.0,
            &fonts.sans,
            t.amount,
            Align::Left,
        );
        draw_string(
            &mut canvas,
            WHITE,
            MARGIN + 60,
            430,
            55.0,
            &fonts.sans_bold,
            &currency::format_amount(record.amount, &record.currency),
            Align::Left,
        );

        let badge = BadgeStatus::of(record);
        let badge_x = PAGE_WIDTH as i32 - MARGIN - 270;
        fill(&mut canvas, badge_x, 408, 240, 72, status_color(badge));
        draw_string(
            &mut canvas,
            WHITE,
            badge_x + 120,
            432,
            17.0,
            &fonts.sans_bold,
            badge.label(t),
            Align::Center,
        );

        // Origin account box.
        self.party_box(
            &mut canvas,
            576,
            168,
            NAVY,
            PALE_BLUE,
            NAVY,
            t.origin_account,
            &[
                Row::mono(t.account, &record.origin.account_number, NAVY),
                Row::name(
                    t.account_name,
                    &truncate_field(&record.origin.account_name, BUDGET_ACCOUNT_NAME),
                ),
                Row::plain(
                    t.bank,
                    &truncate_field(&record.origin.bank_name, BUDGET_BANK_NAME),
                ),
            ],
        );

        // Intermediary account box.
        self.party_box(
            &mut canvas,
            792,
            168,
            BROWN,
            PALE_GOLD,
            GOLD_BORDER,
            t.intermediary_account,
            &[
                Row::mono(t.account, &record.intermediary.account_number, BLACK),
                Row::name(
                    t.account_name,
                    &truncate_field(&record.intermediary.account_name, BUDGET_ACCOUNT_NAME),
                ),
                Row::plain(
                    t.bank,
                    &truncate_field(&record.intermediary.bank_name, BUDGET_BANK_NAME),
                ),
            ],
        );

        // Beneficiary box, one row taller for the BIC line.
        let bic = record.beneficiary.bic.as_deref().unwrap_or("");
        self.party_box(
            &mut canvas,
            1008,
            216,
            GREEN,
            PALE_GREEN,
            GREEN_BORDER,
            t.beneficiary,
            &[
                Row::name(
                    t.beneficiary_name,
                    &truncate_field(&record.beneficiary.name, BUDGET_BENEFICIARY_NAME),
                ),
                Row::mono(t.beneficiary_account, &record.beneficiary.account_number, BLACK),
                Row::plain(
                    t.beneficiary_bank,
                    &truncate_field(&record.beneficiary.bank_name, BUDGET_BANK_NAME),
                ),
                Row::mono(t.bic, bic, BLACK),
            ],
        );

        // Optional concept box. When absent the entire reserved height is
        // skipped and the detail line moves up.
        let mut y = 1296;
        if let Some(concept) = record.concept.as_deref().filter(|c| !c.trim().is_empty()) {
            draw_string(
                &mut canvas,
                NAVY,
                MARGIN,
                y,
                21.0,
                &fonts.sans_bold,
                t.concept,
                Align::Left,
            );
            outline(&mut canvas, MARGIN, y + 30, CONTENT_WIDTH as u32, 96, BORDER_GRAY);
            draw_string(
                &mut canvas,
                Rgba([40, 40, 40, 255]),
                MARGIN + 30,
                y + 66,
                19.0,
                &fonts.sans,
                &truncate_field(concept, BUDGET_CONCEPT),
                Align::Left,
            );
            y += 174;
        }

        // Transaction detail line.
        hline(&mut canvas, y, BORDER_GRAY, 2);
        y += 30;
        draw_string(
            &mut canvas,
            LABEL_GRAY,
            MARGIN,
            y,
            17.0,
            &fonts.sans,
            &format!("{}:", t.transaction_id),
            Align::Left,
        );
        draw_string(
            &mut canvas,
            DARK_GRAY,
            MARGIN + 240,
            y,
            17.0,
            &fonts.mono,
            &record.transfer_id,
            Align::Left,
        );
        if let Some(reference) = record.reference.as_deref().filter(|r| !r.is_empty()) {
            draw_string(
                &mut canvas,
                LABEL_GRAY,
                MARGIN + 630,
                y,
                17.0,
                &fonts.sans,
                &format!("{}:", t.reference),
                Align::Left,
            );
            draw_string(
                &mut canvas,
                DARK_GRAY,
                MARGIN + 780,
                y,
                17.0,
                &fonts.sans,
                &truncate_field(reference, BUDGET_REFERENCE),
                Align::Left,
            );
        }

        // Footer, anchored from the page bottom regardless of content above.
        let footer_y = PAGE_HEIGHT as i32 - 180;
        hline(&mut canvas, footer_y, NAVY, 3);
        draw_string(
            &mut canvas,
            LABEL_GRAY,
            center_x,
            footer_y + 24,
            15.0,
            &fonts.sans,
            t.footer1,
            Align::Center,
        );
        draw_string(
            &mut canvas,
            LABEL_GRAY,
            center_x,
            footer_y + 54,
            15.0,
            &fonts.sans,
            t.footer2,
            Align::Center,
        );
        draw_string(
            &mut canvas,
            LABEL_GRAY,
            center_x,
            footer_y + 84,
            15.0,
            &fonts.sans_bold,
            t.footer3,
            Align::Center,
        );
        draw_string(
            &mut canvas,
            STAMP_GRAY,
            MARGIN,
            footer_y + 120,
            13.0,
            &fonts.sans,
            &format!(
                "Generated: {} UTC",
                generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
            Align::Left,
        );
        fill(
            &mut canvas,
            0,
            PAGE_HEIGHT as i32 - 30,
            PAGE_WIDTH,
            30,
            NAVY,
        );

        canvas
    }

    /// One labeled account box: section heading, filled bordered body, and
    /// up to four key/value rows at fixed offsets.
    fn party_box(
        &self,
        canvas: &mut RgbaImage,
        label_y: i32,
        height: u32,
        heading: Rgba<u8>,
        body: Rgba<u8>,
        border: Rgba<u8>,
        title: &str,
        rows: &[Row<'_>],
    ) {
        let fonts = &self.fonts;
        draw_string(
            canvas,
            heading,
            MARGIN,
            label_y,
            21.0,
            &fonts.sans_bold,
            title,
            Align::Left,
        );
        let box_y = label_y + 30;
        fill(canvas, MARGIN, box_y, CONTENT_WIDTH as u32, height, body);
        outline(canvas, MARGIN, box_y, CONTENT_WIDTH as u32, height, border);

        for (i, row) in rows.iter().enumerate() {
            if row.value.is_empty() {
                continue;
            }
            let row_y = box_y + 18 + i as i32 * 50;
            draw_string(
                canvas,
                LABEL_GRAY,
                MARGIN + 30,
                row_y + 2,
                17.0,
                &fonts.sans,
                &format!("{}:", row.label),
                Align::Left,
            );
            let (font, size) = match row.style {
                RowStyle::Mono => (&fonts.mono_bold, 23.0),
                RowStyle::Name => (&fonts.sans_bold, 19.0),
                RowStyle::Plain => (&fonts.sans, 17.0),
            };
            draw_string(
                canvas,
                row.color,
                MARGIN + 240,
                row_y,
                size,
                font,
                row.value,
                Align::Left,
            );
        }
    }
}

enum RowStyle {
    Mono,
    Name,
    Plain,
}

struct Row<'a> {
    label: &'a str,
    value: &'a str,
    color: Rgba<u8>,
    style: RowStyle,
}

impl<'a> Row<'a> {
    fn mono(label: &'a str, value: &'a str, color: Rgba<u8>) -> Row<'a> {
        Row {
            label,
            value,
            color,
            style: RowStyle::Mono,
        }
    }

    fn name(label: &'a str, value: &'a str) -> Row<'a> {
        Row {
            label,
            value,
            color: BLACK,
            style: RowStyle::Name,
        }
    }

    fn plain(label: &'a str, value: &'a str) -> Row<'a> {
        Row {
            label,
            value,
            color: DARK_GRAY,
            style: RowStyle::Plain,
        }
    }
}
