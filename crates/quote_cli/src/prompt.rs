use std::io::{stdin, stdout, BufRead, IsTerminal, Write};

/// Asks a yes/no question on stdin, anything but 'y' or 'yes' is a no, as is end of input.
pub(crate) fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = ask(&format!("{} [y/N] ", question))?;

    Ok(matches!(
        answer
            .as_deref()
            .map(str::to_lowercase)
            .as_deref(),
        Some("y") | Some("yes")
    ))
}

/// Asks for the store of the given suppliers, only when a person can answer.
///
/// `None` when stdin is not a terminal or the answer is blank.
pub(crate) fn ask_store(suppliers: &[String]) -> anyhow::Result<Option<String>> {
    if !stdin().is_terminal() {
        return Ok(None);
    }

    let answer = ask(&format!("Store for {}: ", suppliers.join(", ")))?;

    Ok(answer.filter(|store| !store.is_empty()))
}

fn ask(prompt: &str) -> anyhow::Result<Option<String>> {
    let mut out = stdout();
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    let read = stdin()
        .lock()
        .read_line(&mut line)?;
    if read == 0 {
        writeln!(out)?;
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
