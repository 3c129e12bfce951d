use arrow::{
    array::Array,
    error::ArrowError,
    util::display::{ArrayFormatter, FormatOptions},
};
use prettytable::{format::consts::FORMAT_CLEAN, Cell, Row, Table};
use qualitool_core::Batch;

const NULL_DISPLAY: &str = "NaN";

/// Cell values of `batch` as text, row by row. Missing values are `None`.
pub fn batch_rows(batch: &Batch) -> Result<Vec<Vec<Option<String>>>, ArrowError> {
    let options = FormatOptions::new();
    let columns = batch
        .columns()
        .iter()
        .map(|c| Ok((c, ArrayFormatter::try_new(c.as_ref(), &options)?)))
        .collect::<Result<Vec<_>, ArrowError>>()?;

    Ok((0..batch.num_rows())
        .map(|row| {
            columns
                .iter()
                .map(|(array, formatter)| {
                    if array.is_null(row) {
                        None
                    } else {
                        Some(formatter.value(row).to_string())
                    }
                })
                .collect()
        })
        .collect())
}

/// Plain text table: a header line then one right-aligned line per row, no borders.
pub fn render_batch(batch: &Batch) -> Result<String, ArrowError> {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);

    let schema = batch.schema();
    table.set_titles(Row::new(
        schema
            .fields()
            .iter()
            .map(|f| Cell::new(f.name()).style_spec("r"))
            .collect(),
    ));

    for values in batch_rows(batch)? {
        table.add_row(Row::new(
            values
                .iter()
                .map(|v| Cell::new(v.as_deref().unwrap_or(NULL_DISPLAY)).style_spec("r"))
                .collect(),
        ));
    }

    Ok(table.to_string().trim_end_matches('\n').to_string())
}
