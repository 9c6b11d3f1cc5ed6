use std::path::PathBuf;

/// Where the solver lives and where the startup hands are recorded.
/// Passed to the supervisor at construction; there is deliberately no
/// process-global solver path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Solver executable, launched with `--json`.
    pub executable: PathBuf,
    /// Startup-hands file, written before each start and read at launch.
    pub startup_file: PathBuf,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            executable: PathBuf::from("dou_solver"),
            startup_file: PathBuf::from("input.txt"),
        }
    }
}
