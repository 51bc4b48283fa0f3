//! Interactive terminal form

use crate::catalog::TaskCatalog;
use crate::error::Result;
use crate::form::InputForm;
use std::io::{BufRead, Write};

/// Show the task list and ask for the four form fields.
///
/// The task answer may be a bare code or a full `"code - description"`
/// string. End of input counts as an empty answer, which validation will
/// then reject.
pub fn read_form<R: BufRead, W: Write>(
    catalog: &TaskCatalog,
    input: &mut R,
    output: &mut W,
) -> Result<InputForm> {
    writeln!(output, "Available tasks:")?;
    for option in catalog.display_options() {
        writeln!(output, "  {option}")?;
    }
    writeln!(output)?;

    let task_selection = ask(input, output, "Task code")?;
    let order_code = ask(input, output, "Order code")?;
    let mu_code = ask(input, output, "MU code")?;
    let address = ask(input, output, "Address")?;

    Ok(InputForm {
        task_selection,
        order_code,
        mu_code,
        address,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_all_fields() {
        let catalog = TaskCatalog::builtin();
        let mut input = Cursor::new("14 - Reparación principal\n1234\nMU9\nCalle 5\n");
        let mut output = Vec::new();

        let form = read_form(&catalog, &mut input, &mut output).unwrap();

        assert_eq!(
            form,
            InputForm::new("14 - Reparación principal", "1234", "MU9", "Calle 5")
        );
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("01 - Inspección de red baja tensión"));
        assert!(shown.contains("Address: "));
    }

    #[test]
    fn eof_gives_empty_answers() {
        let catalog = TaskCatalog::builtin();
        let mut input = Cursor::new("01\r\nOR1\n");
        let mut output = Vec::new();

        let form = read_form(&catalog, &mut input, &mut output).unwrap();

        assert_eq!(form.task_selection, "01");
        assert_eq!(form.order_code, "OR1");
        assert_eq!(form.mu_code, "");
        assert_eq!(form.address, "");
    }
}
