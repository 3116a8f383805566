use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use llvm_to_vm::{
    build_source,
    compiler::compiler::{compile, ModuleOptions},
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    vm::{machine::Machine, module::Module, value::Value},
};

/// Compiles a textual LLVM IR file into a VM module
#[derive(Parser, Debug)]
#[command(name = "llvm-to-vm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `.ll` file
    input: PathBuf,

    /// Print the built AST as JSON
    #[arg(long)]
    emit_ast: bool,

    /// Print the generated module as an instruction listing
    #[arg(long)]
    emit_il: bool,

    /// Run a method of the generated module
    #[arg(long, value_name = "NAME")]
    invoke: Option<String>,

    /// Integer arguments for `--invoke`, in parameter order
    #[arg(long = "arg", value_name = "INT", allow_negative_numbers = true)]
    args: Vec<i64>,

    /// Name of the generated module
    #[arg(long, default_value = "llvm_module")]
    module_name: String,

    /// Name of the type holding the generated methods
    #[arg(long, default_value = "Program")]
    type_name: String,

    /// Print how long each stage took
    #[arg(long)]
    timings: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| args.input.to_string_lossy().to_string());

    let source = match read_to_string(&args.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", args.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let program = match build_source(&source, Some(file_name)) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &args.input, &source);
            return ExitCode::FAILURE;
        }
    };

    if args.timings {
        println!("Parsed in {:?}", start.elapsed());
    }

    if args.emit_ast {
        match serde_json::to_string_pretty(&program) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Failed to serialize the AST: {}", error);
                return ExitCode::FAILURE;
            }
        }
    }

    let compile_start = Instant::now();
    let options = ModuleOptions {
        module_name: args.module_name.clone(),
        type_name: args.type_name.clone(),
    };
    let module = match compile(&program, &options) {
        Ok(module) => module,
        Err(error) => {
            display_error(&error, &args.input, &source);
            return ExitCode::FAILURE;
        }
    };

    if args.timings {
        println!("Compiled in {:?}", compile_start.elapsed());
        println!("Total time: {:?}", start.elapsed());
    }

    if args.emit_il {
        print!("{}", module);
    }

    match &args.invoke {
        Some(method) => run(&module, method, &args.args),
        None => ExitCode::SUCCESS,
    }
}

fn run(module: &Module, method: &str, raw_args: &[i64]) -> ExitCode {
    let Some(body) = module.get_method(method) else {
        eprintln!("Error: no method `{}` in {}", method, module.type_name());
        return ExitCode::FAILURE;
    };

    if body.parameters().len() != raw_args.len() {
        eprintln!(
            "Error: `{}` takes {} arguments, {} given",
            method,
            body.parameters().len(),
            raw_args.len()
        );
        return ExitCode::FAILURE;
    }

    let mut values = Vec::with_capacity(raw_args.len());
    for (ty, raw) in body.parameters().iter().zip(raw_args) {
        match Value::from_integer(ty, *raw) {
            Some(value) => values.push(value),
            None => {
                eprintln!("Error: `{}` cannot be passed as {}", raw, ty);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut machine = Machine::new();
    let result = machine.invoke(module, method, &values);
    print!("{}", machine.take_output());

    match result {
        Ok(Value::Void) => ExitCode::SUCCESS,
        Ok(value) => {
            println!("{} returned {}", method, value);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Runtime error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        Error: SyntaxError (message)
        -> sum.ll
           |
        3  |   %r = add i32 %x %y
           | ----------------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file.display());

    // Generation errors carry no position.
    if error.get_position().1.as_str() == "<null>" {
        return;
    }

    let mut positions = vec![error.get_position().0];
    positions.extend(error.diagnostics().iter().skip(1).map(|diagnostic| diagnostic.position.0));

    for position in positions {
        let Some((line, line_text, line_pos)) = get_line_at_position(source, position) else {
            continue;
        };

        let line_str = line.to_string();
        let padding = line_str.len() + 2;

        eprintln!("{:>padding$}", "|");

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        eprintln!("{} | {}", line_str, line_text_removed.trim_end());

        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
        eprintln!("{:>padding$} {:->arrows$}", "|", "^");
    }

    for diagnostic in error.diagnostics().iter().skip(1) {
        eprintln!("  also: {}", diagnostic);
    }
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();
    (String::from(&string[start..]), start)
}
