use wallet_statement_rs::ParserBuilder;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example statement from demos/sample_statement.txt\n");
        "demos/sample_statement.txt"
    };

    let outcome = ParserBuilder::new().filename(file_path).parse_with_diagnostics()?;

    println!("{}", serde_json::to_string_pretty(&outcome.statement)?);

    for diagnostic in &outcome.diagnostics {
        eprintln!(
            "skipped line {}: {} ({})",
            diagnostic.line_number, diagnostic.reason, diagnostic.line
        );
    }

    Ok(())
}
