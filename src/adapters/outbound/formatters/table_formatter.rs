use crate::application::read_models::QuoteReadModel;
use crate::ports::outbound::QuoteFormatter;
use crate::shared::Result;

const HEADERS: [&str; 4] = ["SKU", "Description", "Quantity", "Config ID"];

/// Placeholder for lines without a source configuration (SMS)
const NO_CONFIG_ID: &str = "—";

/// TableFormatter adapter producing the plain-text quote table
///
/// Columns are SKU and Description (left-aligned) then Quantity and
/// Config ID (right-aligned), separated by ` | ` under a `-+-` rule. The
/// layout pastes cleanly into quoting spreadsheets.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn rows(model: &QuoteReadModel) -> Vec<[String; 4]> {
        model
            .lines
            .iter()
            .map(|line| {
                [
                    line.part.clone(),
                    line.description.clone(),
                    line.qty.to_string(),
                    line.config_id
                        .map_or_else(|| NO_CONFIG_ID.to_string(), |id| id.to_string()),
                ]
            })
            .collect()
    }

    fn column_widths(rows: &[[String; 4]]) -> [usize; 4] {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn render_row(cells: [&str; 4], widths: &[usize; 4]) -> String {
        format!(
            "{:<w0$} | {:<w1$} | {:>w2$} | {:>w3$}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        )
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteFormatter for TableFormatter {
    fn format(&self, model: &QuoteReadModel) -> Result<String> {
        let rows = Self::rows(model);
        let widths = Self::column_widths(&rows);

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(Self::render_row(HEADERS, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &rows {
            lines.push(Self::render_row(
                [&row[0], &row[1], &row[2], &row[3]],
                &widths,
            ));
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::QuoteMetadataView;
    use crate::quoting::domain::QuoteLine;

    fn read_model(lines: Vec<QuoteLine>) -> QuoteReadModel {
        QuoteReadModel {
            metadata: QuoteMetadataView {
                timestamp: "2025-01-01T00:00:00Z".to_string(),
                tool_name: "txe-quote".to_string(),
                tool_version: "1.0.0".to_string(),
                quote_id: "urn:uuid:abc".to_string(),
                catalog_version: "1.0.0".to_string(),
            },
            configurations: Vec::new(),
            lines,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_empty_quote_renders_header_only() {
        let output = TableFormatter::new().format(&read_model(Vec::new())).unwrap();
        assert_eq!(
            output,
            "SKU | Description | Quantity | Config ID\n----+-------------+----------+----------\n"
        );
    }

    #[test]
    fn test_columns_are_padded_to_widest_cell() {
        let lines = vec![
            QuoteLine::new("TPNN0424", "TippingPoint 5600TXE HW + Support 1Yr", Some(1)),
            QuoteLine::new("TPNN0304", "vSMS", None),
        ];
        let output = TableFormatter::new().format(&read_model(lines)).unwrap();
        let rows: Vec<&str> = output.lines().collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            "SKU      | Description                           | Quantity | Config ID"
        );
        assert_eq!(
            rows[1],
            "---------+---------------------------------------+----------+----------"
        );
        assert_eq!(
            rows[2],
            "TPNN0424 | TippingPoint 5600TXE HW + Support 1Yr |        1 |         1"
        );
        assert_eq!(
            rows[3],
            "TPNN0304 | vSMS                                  |        1 |         —"
        );
    }
}
