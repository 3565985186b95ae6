mod render;

use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;

use jordanlp_lang::{Parser, max_var_index};
use jordanlp_solver::{SolutionStatus, Solver, Tableau};

#[derive(ClapParser)]
#[command(name = "jordanlp")]
#[command(about = "Two-phase tableau simplex solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the tableaus and solution
    Solve {
        /// File with the objective on the first line and one constraint
        /// per following line
        file: PathBuf,
        /// Number of decision variables (default: highest index in the file)
        #[arg(short, long)]
        vars: Option<usize>,
        /// Output format (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Check a problem file for parse errors
    Check {
        /// The file to check
        file: PathBuf,
        /// Number of decision variables (default: highest index in the file)
        #[arg(short, long)]
        vars: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { file, vars, format } => {
            let (objective, constraints) = read_problem_file(&file);
            let num_vars = vars.unwrap_or_else(|| infer_num_vars(&objective, &constraints));

            let lines: Vec<&str> = constraints.iter().map(String::as_str).collect();
            let problem = match Parser::parse_problem(&objective, &lines, num_vars) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Parse error: {}", e);
                    std::process::exit(1);
                }
            };

            let solution = match Solver::new().solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Solver error: {}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                match serde_json::to_string_pretty(&solution) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing solution: {}", e);
                        std::process::exit(1);
                    }
                }
                if solution.status != SolutionStatus::Optimal {
                    std::process::exit(1);
                }
                return;
            }

            let initial = Tableau::build(&problem);
            println!("{}", render::canonical_system(&initial));
            println!("Initial tableau:");
            println!("{}", render::tableau(&initial));

            if let Some(ref feasible) = solution.feasible {
                println!("Feasible tableau:");
                println!("{}", render::tableau(&feasible.tableau));
                println!("Feasible solution: {}", render::solution_vector(&feasible.values));
                println!();
            }

            match solution.status {
                SolutionStatus::Optimal => {
                    println!("Terminal tableau:");
                    println!("{}", render::tableau(&solution.tableau));
                    println!("Status: OPTIMAL");
                    println!("Optimal solution: {}", render::solution_vector(&solution.values));
                    println!("Max (Z) = {}", solution.objective_value);
                }
                SolutionStatus::Infeasible => {
                    println!("Terminal tableau:");
                    println!("{}", render::tableau(&solution.tableau));
                    println!("Status: INFEASIBLE");
                    println!("No pivot can remove the negative right-hand side.");
                    std::process::exit(1);
                }
                SolutionStatus::Unbounded => {
                    println!("Terminal tableau:");
                    println!("{}", render::tableau(&solution.tableau));
                    println!("Status: UNBOUNDED");
                    println!("The objective has no finite maximum.");
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { file, vars } => {
            let (objective, constraints) = read_problem_file(&file);
            let num_vars = vars.unwrap_or_else(|| infer_num_vars(&objective, &constraints));

            let mut errors = 0;
            if let Err(e) = Parser::parse_objective(&objective, num_vars) {
                eprintln!("line 1: {}", e);
                errors += 1;
            }
            for (i, line) in constraints.iter().enumerate() {
                if let Err(e) = Parser::parse_constraint(line, num_vars) {
                    eprintln!("line {}: {}", i + 2, e);
                    errors += 1;
                }
            }

            if errors > 0 {
                eprintln!("✗ {} has {} error(s)", file.display(), errors);
                std::process::exit(1);
            }
            println!("✓ {} is valid", file.display());
            println!("  {} variables", num_vars);
            println!("  {} constraints", constraints.len());
        }
    }
}

/// Read a problem file: the first non-empty line is the objective, every
/// further non-empty line a constraint.
fn read_problem_file(path: &PathBuf) -> (String, Vec<String>) {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let mut lines = source.lines().filter(|l| !l.trim().is_empty());
    let Some(objective) = lines.next() else {
        eprintln!("Error: {} is empty", path.display());
        std::process::exit(1);
    };
    let constraints = lines.map(str::to_string).collect();
    (objective.to_string(), constraints)
}

fn infer_num_vars(objective: &str, constraints: &[String]) -> usize {
    constraints
        .iter()
        .map(|l| max_var_index(l))
        .chain(std::iter::once(max_var_index(objective)))
        .max()
        .unwrap_or(0)
}
