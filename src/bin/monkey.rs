use clap::Parser;
use monkey::ast::Program;
use monkey::errors::MonkeyError;
use monkey::evaluator::Environment;
use monkey::lexer::tokenize;
use monkey::object::Object;
use monkey::parser::parse_tokens;
use monkey::utils::read_code;
use std::io::{self, prelude::*};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

const REPL_PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Monkey - interpreter for the Monkey programming language
#[derive(Parser, Debug)]
#[command(name = "monkey")]
#[command(about = "Run Monkey scripts or start an interactive session", long_about = None)]
struct Args {
    /// Log filter used when MONKEY_LOG is not set (e.g. `monkey=trace`)
    #[arg(long, default_value = "warn")]
    log: String,

    /// Print the parsed program before evaluating it
    #[arg(long)]
    debug_parse: bool,

    /// Script to run (if not provided, starts the REPL)
    file: Option<PathBuf>,
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_env("MONKEY_LOG")
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(HierarchicalLayer::new(2).with_indent_lines(true))
        .init();
}

fn print_parser_errors(errors: &[String]) {
    print!("{MONKEY_FACE}");
    println!("Woops! We ran into some monkey business here!");
    println!(" parser errors:");
    for message in errors {
        println!("\t{message}");
    }
}

fn repl(debug_parse: bool) -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut env = Environment::new();

    loop {
        print!("{REPL_PROMPT}");
        if let Err(err) = stdout.flush() {
            eprintln!("{}", MonkeyError::Io(err.to_string()));
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!();
                return ExitCode::SUCCESS;
            }
            Ok(_) => {
                let (program, errors) = parse_tokens(tokenize(&input));
                if !errors.is_empty() {
                    print_parser_errors(&errors);
                    continue;
                }
                if debug_parse {
                    println!("{program}");
                }
                let value = env.evaluate(&program);
                println!("{value}");
            }
            Err(err) => eprintln!("{}", MonkeyError::Io(err.to_string())),
        }
    }
}

/// Parses a whole script once; a program with syntax errors is never handed out.
fn parse_script(code: &str) -> Result<Program, Vec<String>> {
    let (program, errors) = parse_tokens(tokenize(code));
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

fn run_file(filename: &Path, debug_parse: bool) -> ExitCode {
    let code = match read_code(filename) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let program = match parse_script(&code) {
        Ok(program) => program,
        Err(errors) => {
            eprintln!("Error (parsing):");
            for message in errors {
                eprintln!("\t{message}");
            }
            return ExitCode::FAILURE;
        }
    };
    if debug_parse {
        println!("{program}");
    }

    match Environment::new().evaluate(&program) {
        Object::Error(message) => {
            eprintln!("{}", MonkeyError::Runtime(message));
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log);

    match &args.file {
        Some(filename) => run_file(filename, args.debug_parse),
        None => repl(args.debug_parse),
    }
}
