pub type CmdResult<T> = retoken::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub json: bool,
}

pub mod presets;
pub mod run;

/// Dispatch a command to its handler and emit its output.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::emit($module::run($args, $global), $global)
    };
}

pub(crate) fn run_command(command: crate::Commands, global: &GlobalArgs) -> i32 {
    if global.json {
        crate::tty::status("retoken is working...");
    }

    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Presets(args) => dispatch!(args, global, presets),
    }
}
