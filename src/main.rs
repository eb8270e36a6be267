mod args;

use args::{Cli, Commands};
use clap::Parser;

use std::fs;
use std::time::Instant;

use aeschain::{Cipher, Key, ModeKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid --iv hex: {0}")]
    IvInvalidHex(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Aes(#[from] aeschain::Error),
}

fn main() {
    if let Err(e) = aes_cli() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn aes_cli() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            let input_path = enc.common.input; // move ownership
            let output_path = enc.common.output;
            let key_path = enc.common.key;
            let mode = mode_kind(enc.common.mode);

            let plaintext = fs::read(input_path)?;

            // read or generate key
            let key = if enc.gen_key {
                let size = match enc.key_size {
                    args::KeySize::Bits128 => aeschain::KeySize::Bits128,
                    args::KeySize::Bits192 => aeschain::KeySize::Bits192,
                    args::KeySize::Bits256 => aeschain::KeySize::Bits256,
                };
                let rand_key = Key::random(size)?;
                fs::write(key_path, rand_key.as_bytes())?;
                rand_key
            } else {
                Key::try_from_slice(&fs::read(key_path)?)?
            };

            let cipher = Cipher::new(&key);
            let start = Instant::now();

            let ciphertext = match enc.iv {
                Some(iv_str) => {
                    let iv = parse_hex(&iv_str)?;
                    let mut out = iv.clone();
                    out.append(&mut cipher.encrypt_with_iv(mode, &iv, &plaintext)?);
                    out
                }
                None => cipher.encrypt(mode, &plaintext)?,
            };

            let duration = start.elapsed();

            fs::write(output_path, &ciphertext)?;
            println!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(dec) => {
            let input_path = dec.common.input; // move ownership
            let output_path = dec.common.output;
            let key_path = dec.common.key;
            let mode = mode_kind(dec.common.mode);

            let ciphertext = fs::read(input_path)?;
            let key = Key::try_from_slice(&fs::read(key_path)?)?;

            let cipher = Cipher::new(&key);
            let start = Instant::now();

            let mut plaintext = cipher.decrypt(mode, &ciphertext)?;

            let duration = start.elapsed();

            if dec.trim_zeros {
                let end = plaintext.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                plaintext.truncate(end);
            }

            fs::write(output_path, &plaintext)?;
            println!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );

            Ok(())
        }
    }
}

fn mode_kind(mode: args::Mode) -> ModeKind {
    match mode {
        args::Mode::ModeCBC => ModeKind::Cbc,
        args::Mode::ModeCFB => ModeKind::Cfb,
        args::Mode::ModeOFB => ModeKind::Ofb,
    }
}

// whitespace is ignored; an odd digit count gets a leading zero
fn parse_hex(s: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    let mut hex: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    if hex.len() % 2 == 1 {
        hex.insert(0, '0');
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
}
