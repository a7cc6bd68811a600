//! numcalc - interactive calculator over the numeric tower
//!
//! Reads `<literal>`, `- <literal>` or `<literal> <op> <literal>` per line
//! and prints the inspect string of the result.
//!
//! Configuration comes from `NUMTOWER_CONFIG`, `NUMTOWER_MIN_PRECISION` and
//! `NUMTOWER_FLOAT_PRECISION`; `NUMTOWER_TRACE=1` logs promotions (debug
//! builds only).

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use numtower::arith::{binop, negate, BinOp};
use numtower::config::TowerConfig;
use numtower::context::NumericContext;
use numtower::error::NumResult;
use numtower::literal::parse_literal;
use numtower::value::Value;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Evaluate one input line.
fn evaluate(ctx: &NumericContext<'_>, line: &str) -> Result<Value, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let result: NumResult<Value> = match tokens.as_slice() {
        [literal] => parse_literal(literal),
        ["-", literal] => parse_literal(literal).and_then(|v| negate(ctx, &v)),
        [lhs, op, rhs] => {
            let op = BinOp::from_token(op).ok_or_else(|| format!("unknown operator: {}", op))?;
            parse_literal(lhs).and_then(|l| {
                let r = parse_literal(rhs)?;
                binop(ctx, op, &l, &r)
            })
        }
        _ => return Err("expected `<literal>` or `<literal> <op> <literal>`".to_string()),
    };
    result.map_err(|e| format!("{:?}: {}", e.kind(), e))
}

fn print_help() {
    println!(
        r#"Enter a literal or a binary expression separated by spaces:

    9223372036854775807 + 1
    12.7bf * 3
    0xffu8 << 1
    - 5i8

Operators: + - * / % ** << >> < <= > >= == !=
Suffixes:  i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 bf
Type "exit" to quit."#
    );
}

fn main() {
    let config = TowerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let ctx = NumericContext::from_config(&config);

    println!("numcalc v{} - numeric tower calculator", VERSION);
    println!("Type \"?\" for help, \"exit\" to exit.\n");

    let editor_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), DefaultHistory> =
        Editor::with_config(editor_config).unwrap_or_else(|e| {
            eprintln!("Error: failed to create editor: {}", e);
            std::process::exit(1);
        });

    loop {
        match rl.readline("num> ") {
            Ok(input) => match input.trim() {
                "" => continue,
                "exit" | "quit" => break,
                "?" | "help" => print_help(),
                line => match evaluate(&ctx, line) {
                    Ok(value) => println!("{}", value.inspect()),
                    Err(message) => println!("ERROR: {}", message),
                },
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
}
