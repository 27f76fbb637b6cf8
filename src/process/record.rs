// src/process/record.rs

use scraper::{ElementRef, Html};

use super::normalize::{normalize_currency, split_reference};
use crate::error::Result;
use crate::fetch::selector;

/// CSV header. Fields are positional: the portal's table row order fills
/// these columns.
pub const HEADER: [&str; 12] = [
    "matricula",
    "mes",
    "ano",
    "vinculo",
    "nome",
    "cargo",
    "lotacao",
    "remuneracao",
    "abono",
    "eventuais",
    "desconto",
    "salario_liquido",
];

const CPF: &str = "CPF";
const REFERENCE: &str = "Referência";
const MONEY_LABELS: [&str; 5] = [
    "Abono",
    "Remuneração",
    "Eventuais",
    "Desconto",
    "Salário Líquido",
];

/// One employee's payroll entry, fields in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollRecord {
    pub fields: Vec<String>,
}

impl PayrollRecord {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.fields.push(field.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }
}

/// Parses a payroll item page.
///
/// Every `<tr>` after the first is read as a label cell followed by a value
/// cell. `CPF` rows are dropped, `Referência` becomes two fields and money
/// values are normalized; any other value is kept verbatim.
pub fn parse_record(html: &str) -> Result<PayrollRecord> {
    let rows = selector("tr")?;
    let cells = selector("td")?;
    let doc = Html::parse_document(html);

    let mut record = PayrollRecord::default();
    for row in doc.select(&rows).skip(1) {
        let label_cell = row.select(&cells).next();
        let label = label_cell.map(cell_text).unwrap_or_default();
        let value = label_cell
            .and_then(|c| c.next_siblings().find_map(ElementRef::wrap))
            .map(cell_text)
            .unwrap_or_default();

        let key = label.trim();
        if key == CPF {
            continue;
        }
        if key == REFERENCE {
            let (first, second) = split_reference(key, &value)?;
            record.push(first);
            record.push(second);
        } else if MONEY_LABELS.contains(&key) {
            record.push(normalize_currency(key, &value)?);
        } else {
            record.push(value);
        }
    }
    Ok(record)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}
