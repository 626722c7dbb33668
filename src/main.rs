//! Rill front-end driver: parse a source file and print its AST.

use std::fs;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use rill::parser::{Parser, TokenKind, TokenStream};

#[derive(ClapParser)]
#[command(name = "rill")]
#[command(about = "Front end for the Rill language", version)]
struct Cli {
    /// Source file to parse
    input: String,

    /// Dump the token stream before parsing
    #[arg(long)]
    show_tokens: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: cannot read '{}': {}", cli.input, err);
            return ExitCode::FAILURE;
        }
    };

    let mut stream = TokenStream::new(&source);

    if cli.show_tokens {
        // Dump every token, then rewind the same stream for the parse:
        // nothing is scanned twice.
        let start = stream.mark();
        loop {
            match stream.consume() {
                Ok(token) if token.kind == TokenKind::Eof => break,
                Ok(token) => println!("{}({})", token.kind.name(), token.text),
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        println!("================");
        stream.backtrack(start);
    }

    let mut parser = Parser::with_stream(stream);
    match parser.parse_program() {
        Ok(root) => {
            if root.children().is_empty() {
                println!("The file is empty.");
            } else {
                println!("{root:#?}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
