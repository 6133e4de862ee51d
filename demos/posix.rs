use std::io::{stdin, stdout, Read, Write};
use std::os::fd::AsFd;

use nix::sys::termios::{self, SetArg};
use vtline::{sink_fn, Config, LineMachine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = stdin();
    let saved = termios::tcgetattr(input.as_fd())?;
    let mut raw = saved.clone();
    // Raw mode also turns off ISIG, so Ctrl-C arrives as an ordinary 0x03
    // byte rather than as a signal.
    termios::cfmakeraw(&mut raw);
    termios::tcsetattr(input.as_fd(), SetArg::TCSANOW, &raw)?;

    let result = run(&input);

    termios::tcsetattr(input.as_fd(), SetArg::TCSANOW, &saved)?;
    result
}

fn run(input: &std::io::Stdin) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = stdout();
    let config = Config::new().with_prompt("POSIX> ")?;
    let mut machine = LineMachine::with_config(
        sink_fn(|b, is_last| {
            let _ = out.write_all(&[b]);
            if is_last {
                let _ = out.flush();
            }
        }),
        config,
    );
    machine.prompt();

    let mut r = input.lock();
    let mut buf = [0_u8; 64];
    loop {
        let read_len = r.read(&mut buf[..])?;
        if read_len == 0 {
            return Ok(());
        }
        for &b in &buf[..read_len] {
            if !machine.insert_char(b) {
                continue;
            }
            let args = machine.args();
            let mut report = format!("Got {} args\r\n", args.len());
            for (i, arg) in args.iter().enumerate() {
                report += &format!(
                    "Arg {i}/{}: '{}'\r\n",
                    args.len(),
                    String::from_utf8_lossy(arg)
                );
            }
            let quit = args.get(0) == Some(&b"quit"[..]);

            print!("{report}");
            if quit {
                return Ok(());
            }
            machine.prompt();
        }
    }
}
