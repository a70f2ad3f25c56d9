use std::env::args_os;
use std::process::exit;

use box_blur::{blur_image_file, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match blur_image_file(&arguments) {
        Ok(_) => println!("Blur successful"),
        Err(e) => {
            eprintln!("Blur failed because of: {}", e);
            exit(1);
        }
    }
}
