use treegen::{
    schema::Family,
    writer::{self, WriteMode},
};
use std::{
    env,
    io::{self, Write},
    path::Path,
};

const EXPRESSION_TYPES: &'static [&'static str] = &[
    "Assign : Token name, Expr value",
    "Binary : Expr left, Token operator, Expr right",
    "Call : Expr callee, Token paren, List<Expr> arguments",
    "Grouping : Expr expression",
    "Literal : Object value",
    "Logical : Expr left, Token operator, Expr right",
    "Unary : Token operator, Expr right",
    "Variable : Token name",
];

const STATEMENT_TYPES: &'static [&'static str] = &[
    "Block : List<Stmt> statements",
    "Expression : Expr expression",
    "Function : Token name, List<Token> params, List<Stmt> body",
    "If : Expr condition, Stmt thenBranch, Stmt elseBranch",
    "Print : Expr expression",
    "Return : Token keyword, Expr value",
    "Var : Token name, Expr initializer",
    "While : Expr condition, Stmt body",
];

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        2 => generate_into(args[1].as_str())?,
        _ => {
            writeln!(stdout, "Usage: treegen <output directory>")?;
            std::process::exit(64);
        },
    };

    Ok(())
}

fn generate_into(dir: &str) -> io::Result<()> {
    let families = [
        Family::parse("Expr", EXPRESSION_TYPES)?,
        Family::parse("Stmt", STATEMENT_TYPES)?,
    ];
    writer::write_families(Path::new(dir), &families, WriteMode::Truncate)?;
    Ok(())
}
