use std::path::PathBuf;

use assert_cmd::Command;
use indoc::indoc;
use tempfile::{tempdir, TempDir};
use util::test::{print, write_temp_file};

pub const PARTS_CSV: &str = indoc! {r#"
    SUPPLIER,TYPE,DESCRIPTION,PARTNUMBER,PRICE,NOTES
    Haymans 2025,Valve,Gate Valve 25mm,GV25,$12.50,
    Haymans 2025,Valve,Ball Valve 15mm,BV15,$8.00,Brass
    Rexel,Detector,Smoke Detector,SD100,"1,234.50",Obsolete
    Middys,Cable,Cable 2.5mm,CAB25,$3.20,
"#};

/// Each test gets its own data directory.
pub struct Context {
    pub temp_dir: TempDir,
}

impl Context {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().unwrap(),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_quote_cli"));
        cmd.arg("--data-dir")
            .arg(self.temp_dir.path());
        cmd
    }

    pub fn write_file(&self, file_name: &str, content: &str) -> PathBuf {
        write_temp_file(&self.temp_dir, file_name, content).unwrap()
    }

    /// Writes and loads `PARTS_CSV`.
    pub fn load_parts(&self) -> PathBuf {
        let path = self.write_file("parts.csv", PARTS_CSV);

        self.command()
            .arg("load")
            .arg("--file")
            .arg(&path)
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"));

        path
    }

    pub fn add_manual(&self, supplier: &str, description: &str, part_number: &str, price: &str, qty: &str) {
        self.command()
            .args(["quote", "add-manual"])
            .args(["--supplier", supplier])
            .args(["--description", description])
            .args(["--part-number", part_number])
            .args(["--price", price])
            .args(["--qty", qty])
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"));
    }
}
