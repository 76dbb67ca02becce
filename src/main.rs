use std::io;

use zho_office_converter::action::cli::{format_summary, process_args};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let entries = process_args(args)?;
    println!("{}", format_summary(&entries));

    let succeeded = entries.iter().filter(|e| e.outcome.success).count();
    log::info!("程式執行完成，成功 {} 個，失敗 {} 個", succeeded, entries.len() - succeeded);
    if !entries.is_empty() && succeeded == 0 {
        std::process::exit(1);
    }
    Ok(())
}
