// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::utils::{fmt_amount, fmt_date};
use anyhow::Result;
use std::io::Write;

pub const CSV_HEADER: [&str; 4] = ["Title", "Amount", "Date", "Type"];

/// CSV with `\n` line endings. Fields are quoted only when they need it.
pub fn to_csv(txs: &[Transaction]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for tx in txs {
        let row = [
            tx.title.clone(),
            fmt_amount(&tx.amount),
            fmt_date(&tx.date),
            tx.kind.to_string(),
        ];
        wtr.write_record(&row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub const PAGE_WIDTH: u32 = 300;
pub const PAGE_HEIGHT: u32 = 600;
const TOP: u32 = 40;
const PAGE_BREAK_AFTER: u32 = 550;
const COLUMNS: [u32; 4] = [10, 120, 180, 250];
const RULE: (u32, u32) = (10, 290);
const HEADER_SIZE: u32 = 14;
const BODY_SIZE: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// `y` grows downwards from the top edge.
    Text {
        x: u32,
        y: u32,
        size: u32,
        bold: bool,
        text: String,
    },
    Rule {
        x1: u32,
        x2: u32,
        y: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }

    fn text(&mut self, x: u32, y: u32, size: u32, bold: bool, text: &str) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            text: text.to_string(),
        });
    }
}

/// Opens a page with its banner and column headers; returns the first row's y.
fn start_page(banner: &str) -> (Page, u32) {
    let mut page = Page::default();
    let mut y = TOP;
    page.text(COLUMNS[0], y, HEADER_SIZE, true, banner);
    y += 20;
    for (x, label) in COLUMNS.iter().zip(CSV_HEADER) {
        page.text(*x, y, HEADER_SIZE, true, label);
    }
    y += 20;
    page.ops.push(DrawOp::Rule {
        x1: RULE.0,
        x2: RULE.1,
        y,
    });
    y += 10;
    (page, y)
}

/// Lays the transactions out on fixed-size pages, repeating headers on each page.
pub fn layout_report(txs: &[Transaction]) -> Vec<Page> {
    let mut pages = Vec::new();
    let (mut page, mut y) = start_page("Transactions Report");
    for tx in txs {
        if y > PAGE_BREAK_AFTER {
            pages.push(std::mem::take(&mut page));
            (page, y) = start_page("Transactions Report - Continued");
        }
        let cells = [
            tx.title.clone(),
            fmt_amount(&tx.amount),
            fmt_date(&tx.date),
            tx.kind.to_string(),
        ];
        for (x, cell) in COLUMNS.iter().zip(cells.iter()) {
            page.text(*x, y, BODY_SIZE, false, cell);
        }
        y += 20;
    }
    pages.push(page);
    pages
}

fn pdf_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn content_stream(page: &Page) -> String {
    let mut s = String::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                bold,
                text,
            } => {
                let font = if *bold { "F2" } else { "F1" };
                s.push_str(&format!(
                    "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
                    font,
                    size,
                    x,
                    PAGE_HEIGHT - y,
                    pdf_escape(text)
                ));
            }
            DrawOp::Rule { x1, x2, y } => {
                let py = PAGE_HEIGHT - y;
                s.push_str(&format!("0.5 G {} {} m {} {} l S 0 G\n", x1, py, x2, py));
            }
        }
    }
    s
}

/// Serializes laid-out pages as a PDF 1.4 document using the base Helvetica fonts.
pub fn render_pdf(pages: &[Page]) -> Result<Vec<u8>> {
    // 1 catalog, 2 page tree, 3-4 fonts, then a (page, contents) pair per page
    let page_obj = |i: usize| 5 + 2 * i;
    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", page_obj(i)))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
    ];
    for (i, page) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            page_obj(i) + 1
        ));
        let stream = content_stream(page);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out: Vec<u8> = Vec::new();
    out.write_all(b"%PDF-1.4\n")?;
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body)?;
    }
    let xref_at = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1)?;
    for off in offsets {
        write!(out, "{:010} 00000 n \n", off)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    )?;
    Ok(out)
}

pub fn to_pdf(txs: &[Transaction]) -> Result<Vec<u8>> {
    render_pdf(&layout_report(txs))
}
