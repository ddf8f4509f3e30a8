#![allow(dead_code)]

/// A typical configuration: kernel plugins, a global overlay, a game with a
/// halt marker and the LiveArea shell.
pub const CONFIG: &str = concat!(
    "# taiHEN configuration\n",
    "*KERNEL\n",
    "ur0:tai/kernel_plugin.skprx\n",
    "\n",
    "*ALL\n",
    "  ux0:tai/overlay.suprx   \n",
    "*!PCSE00000\n",
    "ux0:tai/game_patch.suprx\n",
    "*main\n",
    "ux0:tai/shell_ext.suprx\n",
);

/// Renders every token with its line number, one per line.
pub fn render_tokens(input: &str) -> String {
    use std::fmt::Write;

    let mut tokenizer = taihen_config::Tokenizer::new(input);
    let mut out = String::new();
    loop {
        match tokenizer.advance() {
            Ok(true) => {
                writeln!(out, "{:02} {:?}", tokenizer.line_number(), tokenizer.token()).unwrap();
            }
            Ok(false) => break,
            Err(err) => {
                writeln!(out, "{:02} error: {err}", tokenizer.line_number()).unwrap();
                break;
            }
        }
    }
    out
}
