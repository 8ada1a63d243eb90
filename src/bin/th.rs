extern crate tagheap;

use std::io::{self, IsTerminal};
use std::process;

use tagheap::driver::options::TagheapOptions;
use tagheap::driver::session::{self, Session};
use tagheap::driver::statistics::Statistics;

pub fn main() {
    let opt = TagheapOptions::from_args();

    let mut session = match Session::new(opt.heap_size) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &opt.script {
        Some(path) => session::run_script(&mut session, path, &mut out),
        None => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            let mut input = stdin.lock();
            session.run(&mut input, &mut out, prompt)
        }
    };

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            1
        }
    };

    exit(&opt, code, session.statistics());
}

/// Optionally dump stats to stderr then exit
pub fn exit(opts: &TagheapOptions, code: i32, stats: &Statistics) {
    if opts.statistics() {
        eprintln!();
        eprintln!("~~~~~~~~~~");
        eprintln!("STATISTICS");
        eprintln!("~~~~~~~~~~");
        eprintln!();
        eprintln!("{stats}");
    }
    process::exit(code)
}
