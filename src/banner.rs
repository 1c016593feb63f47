//! Startup banner and goodbye line.

use crate::consts::{AUTHOR, HOMEPAGE};

/// What the banner reports about this session.
pub struct BannerInfo<'a> {
    pub server: &'a str,
    pub config: &'a str,
    pub timeout: Option<u64>,
}

pub fn banner_text(info: &BannerInfo) -> String {
    let timeout = match info.timeout {
        Some(secs) => format!("{secs}s"),
        None => "none".to_string(),
    };
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             A S K P D F               ║
   ║     upload a document, ask it things  ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   server    {}
   timeout   {}
   config    {}

   /open <file> to pick a PDF, /upload to send it, then type a question.
   /help lists every command.
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        info.server,
        timeout,
        info.config,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

pub fn print_goodbye() {
    println!("goodbye.");
}
