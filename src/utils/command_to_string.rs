use itertools::Itertools;

pub fn command_to_string(cmd: &std::process::Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args = cmd.get_args().map(|arg| arg.to_string_lossy()).join(" ");
    format!("{} {}", program, args)
}
