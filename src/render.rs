use termion::{color, cursor};

use crate::note::Note;
use crate::sort::{SortDir, SortField, SortSpec};
use crate::viewport::Viewport;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub enum Field {
    Star,
    Title,
    Updated,
    Created,
}

pub struct Column {
    pub field: Field,
    pub name: String,
    pub sort_field: Option<SortField>,
}

impl Column {
    pub fn new(field: Field, name: &str, sort_field: Option<SortField>) -> Self {
        Column {
            field,
            name: name.to_string(),
            sort_field,
        }
    }
}

pub fn note_columns() -> Vec<Column> {
    vec![
        Column::new(Field::Star, "", None),
        Column::new(Field::Title, "Title", Some(SortField::Alphabetical)),
        Column::new(Field::Updated, "Updated", Some(SortField::UpdatedAt)),
        Column::new(Field::Created, "Created", Some(SortField::CreatedAt)),
    ]
}

pub trait Columnar {
    fn get_value(&self, column: &Column) -> String;
}

impl Columnar for Note {
    fn get_value(&self, column: &Column) -> String {
        match column.field {
            Field::Star => String::from(if self.is_starred { "*" } else { " " }),
            Field::Title => self.title.clone(),
            Field::Updated => self.updated_at.format(DATE_FORMAT).to_string(),
            Field::Created => self.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

pub struct TableDisplay<'a> {
    pub rows: &'a [Note],
    pub columns: Vec<Column>,
    pub sort_by: SortSpec,
    pub selected_key: Option<&'a str>,
    pub viewport: &'a Viewport,
}

impl TableDisplay<'_> {
    fn get_column_width(&self, column: &Column) -> usize {
        let mut width = column.name.chars().count() + 4;
        for row in self.rows {
            let col_w = row.get_value(column).chars().count() + 4;
            if col_w > width {
                width = col_w;
            }
        }
        width
    }

    pub fn draw_header(&self) -> String {
        let sort_indicator = match self.sort_by.dir {
            SortDir::Desc => "↓",
            SortDir::Asc => "↑",
        };

        let mut header_str = format!(
            "{clear}{goto}{color}",
            goto = cursor::Goto(1, 1),
            clear = termion::clear::All,
            color = color::Fg(color::Yellow),
        );

        for column in &self.columns {
            let value = if column.sort_field == Some(self.sort_by.field) {
                format!("{} {}", column.name, sort_indicator)
            } else {
                column.name.clone()
            };
            header_str = format!(
                "{header_str}{value:<width$}",
                width = self.get_column_width(column),
            );
        }

        format!("{header_str}{reset}\n", reset = color::Fg(color::Reset))
    }

    pub fn draw(&self) -> String {
        let mut table_str = self.draw_header();
        let (first, _) = self.viewport.window();

        for (index, row) in self.rows.iter().enumerate() {
            if !self.viewport.contains(index) {
                continue;
            }

            let mut row_str = String::new();
            if self.selected_key == Some(row.key.as_str()) {
                row_str = format!(
                    "{highlight}{fontcolor}",
                    highlight = color::Bg(color::White),
                    fontcolor = color::Fg(color::Black),
                );
            }

            row_str = format!(
                "{row_str}{goto}",
                goto = cursor::Goto(1, (index - first + 2) as u16),
            );

            for column in &self.columns {
                row_str = format!(
                    "{row_str}{value:<width$}",
                    value = row.get_value(column),
                    width = self.get_column_width(column)
                );
            }

            table_str = format!(
                "{table_str}{row_str}{reset_highlight}{reset_fontcolor}",
                reset_highlight = color::Bg(color::Reset),
                reset_fontcolor = color::Fg(color::Reset)
            );
        }

        table_str
    }
}

/// Tab separated rows for non-interactive output.
pub fn plain_rows(rows: &[Note]) -> Vec<String> {
    let columns = note_columns();
    rows.iter()
        .map(|row| {
            let values: Vec<String> = std::iter::once(row.key.clone())
                .chain(columns.iter().map(|column| row.get_value(column)))
                .collect();
            values.join("\t")
        })
        .collect()
}
