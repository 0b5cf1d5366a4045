pub mod common;

mod parts {
    use std::fs::read_to_string;

    use predicates::prelude::*;
    use util::test::{prepare_args, print};

    use crate::common::Context;

    #[test]
    fn load_and_search() {
        // given
        let ctx = Context::new();

        // and
        let path = ctx.write_file("parts.csv", crate::common::PARTS_CSV);
        let expected_notice = format!("Loaded 4 parts. source: {}", path.display());

        // when
        ctx.command()
            .arg("load")
            .arg("--file")
            .arg(&path)
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains(expected_notice));

        // when
        ctx.command()
            .args(prepare_args(vec!["search valve"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Showing 2 of 4 parts. sort: SUPPLIER:ASC"))
            .stdout(predicate::str::contains(
                "  1. Haymans 2025 | [Valve] | Ball [Valve] 15mm | BV15 | $8.00 | Brass\n  2. Haymans 2025 | [Valve] | Gate [Valve] 25mm | GV25 | $12.50\n",
            ))
            .stdout(predicate::str::contains("SD100").not());
    }

    #[test]
    fn search_with_filter_and_sort() {
        // given
        let ctx = Context::new();
        ctx.load_parts();

        // when
        ctx.command()
            .args(prepare_args(vec!["search --sort price:desc"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("sort: PRICE:DESC"))
            .stdout(predicate::str::contains("  1. Rexel | Detector | Smoke Detector | SD100 | $1234.50 | Obsolete"))
            .stdout(predicate::str::contains("  4. Middys | Cable | Cable 2.5mm | CAB25 | $3.20"));

        // when
        ctx.command()
            .args(prepare_args(vec!["search --type detector"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Showing 1 of 4 parts"));
    }

    #[test]
    fn missing_headers_keep_the_cached_parts() {
        // given
        let ctx = Context::new();
        ctx.load_parts();

        // and
        let bad_path = ctx.write_file("bad.csv", "SUPPLIER,DESCRIPTION\nRexel,Plate\n");

        // when
        ctx.command()
            .arg("load")
            .arg("--file")
            .arg(&bad_path)
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stderr(predicate::str::contains("Missing headers: partnumber, price"));

        // when
        ctx.command()
            .arg("search")
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Showing 4 of 4 parts"));
    }

    #[test]
    fn spreadsheet_files_are_rejected() {
        // given
        let ctx = Context::new();
        let path = ctx.write_file("parts.xlsx", "");

        // when
        ctx.command()
            .arg("load")
            .arg("--file")
            .arg(&path)
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains("Please choose a .csv file"));
    }

    #[test]
    fn clear_cache() {
        // given
        let ctx = Context::new();
        ctx.load_parts();

        // when
        ctx.command()
            .arg("clear-cache")
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Cleared the cached parts list"));

        // when
        ctx.command()
            .arg("search")
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("No parts loaded"));
    }

    #[test]
    fn trace_log() {
        // given
        let ctx = Context::new();
        let trace_path = ctx.temp_dir.path().join("trace.log");

        // when
        ctx.command()
            .arg("--trace")
            .arg(&trace_path)
            .arg("search")
            // then
            .assert()
            .success()
            .stderr(print("stderr"));

        // and
        let trace_content = read_to_string(&trace_path).unwrap();
        println!("{}", trace_content);
        assert!(trace_content.contains("Initializing"));
    }
}

mod quote {
    use indoc::indoc;
    use predicates::prelude::*;
    use util::test::{prepare_args, print};

    use crate::common::Context;

    #[test]
    fn add_from_parts_merges_identical_items() {
        // given
        let ctx = Context::new();
        ctx.load_parts();

        // when
        ctx.command()
            .args(prepare_args(vec!["quote add --query GV25"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains(
                "Added to quote: Haymans 2025 — Gate Valve 25mm — GV25 — $12.50 each",
            ));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote add --query GV25"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Quantity increased to 2"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote list"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains(
                "  1. 2 x Gate Valve 25mm — GV25 — $12.50 each (Haymans price) = $25.00\nTotal: $25.00",
            ));
    }

    #[test]
    fn ambiguous_query_needs_a_row() {
        // given
        let ctx = Context::new();
        ctx.load_parts();

        // when
        ctx.command()
            .args(prepare_args(vec!["quote add --query valve"]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains("Multiple matching parts"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote add --query valve --row 2"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Added to quote: Haymans 2025 — Gate Valve 25mm"));
    }

    #[test]
    fn quote_text_total() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Supplier A", "Item A", "A", "10.00", "2");
        ctx.add_manual("Supplier B", "Item B", "B", "$5.50", "1");
        ctx.add_manual("Supplier C", "Item C", "C", "0.99", "3");

        // and
        let expected_output = indoc! {"
            2 x Item A — A — $10.00 each
            1 x Item B — B — $5.50 each
            3 x Item C — C — $0.99 each

            Total: $28.47
        "};

        // when
        ctx.command()
            .args(prepare_args(vec!["quote text"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(expected_output);
    }

    #[test]
    fn invalid_manual_price() {
        // given
        let ctx = Context::new();

        // when
        ctx.command()
            .args(prepare_args(vec![
                "quote add-manual --supplier Rexel --description Plate --part-number P1 --price TBA",
            ]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains(
                "Invalid line. reason: price must be a number of zero or more, found: 'TBA'",
            ));
    }

    #[test]
    fn manual_price_too_large_to_total() {
        // given
        let ctx = Context::new();

        // when
        ctx.command()
            .args(prepare_args(vec![
                "quote add-manual --supplier Rexel --description Plate --part-number P1 --price 50000000000000000000000000000 --qty 2",
            ]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains(
                "Invalid line. reason: the quote total would be too large. part_number: 'P1', qty: 2",
            ));

        // and
        ctx.command()
            .args(prepare_args(vec!["quote list"]))
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("The quote is empty"));
    }

    #[test]
    fn set_quantity_and_remove() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Rexel", "Plate", "P1", "2.00", "1");
        ctx.add_manual("Middys", "Cable", "C1", "3.00", "1");

        // when
        ctx.command()
            .args(prepare_args(vec!["quote set-qty --index 2 --qty 0"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("  2. 1 x Cable — C1 — $3.00 each (Middys price) = $3.00"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote set-qty --index 5 --qty 2"]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains("Invalid line number. line: 5, lines: 2"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote remove --index 1"]))
            .write_stdin("n\n")
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Remove line 1: 1 x Plate — P1 — $2.00 each (Rexel price)? [y/N]"))
            .stdout(predicate::str::contains("Removal cancelled"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote remove --index 1 --yes"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Removed from quote: Plate"))
            .stdout(predicate::str::contains("Total: $3.00"));
    }

    #[test]
    fn clear_requires_confirmation() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Rexel", "Plate", "P1", "2.00", "1");

        // when
        ctx.command()
            .args(prepare_args(vec!["quote clear"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Nothing was cleared"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote clear"]))
            .write_stdin("y\n")
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Cleared the quote and build case"));

        // when
        ctx.command()
            .args(prepare_args(vec!["quote list"]))
            // then
            .assert()
            .success()
            .stdout("The quote is empty\n");
    }

    #[test]
    fn copy_falls_back_to_the_copy_area() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Rexel", "Plate", "P1", "2.00", "1");

        // and
        let expected_copy_area = indoc! {"
            ----- copy area start -----
            1 x Plate — P1 — $2.00 each

            Total: $2.00
            ----- copy area end -----
        "};

        // when
        ctx.command()
            .env_remove("DISPLAY")
            .env_remove("WAYLAND_DISPLAY")
            .args(prepare_args(vec!["quote text --copy"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains(expected_copy_area))
            .stderr(predicate::str::contains("Unable to copy to clipboard"));
    }
}

mod purchase_orders {
    use indoc::indoc;
    use predicates::prelude::*;
    use util::test::{prepare_args, print};

    use crate::common::Context;

    #[test]
    fn purchase_order_text_per_supplier() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Haymans 2025", "Gate Valve 25mm", "GV25", "12.50", "2");
        ctx.add_manual("Rexel", "Plate", "P1", "2.00", "1");

        // and
        let expected_output = indoc! {"
            Please forward a PO to Haymans for job J100
            2 x Gate Valve 25mm — GV25 — $12.50 each (Haymans price list)

            Please forward a PO to Rexel for job J100
            1 x Plate — P1 — $2.00 each (Rexel price list)
        "};

        // when
        ctx.command()
            .args(prepare_args(vec!["po text --job J100"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(expected_output);
    }

    #[test]
    fn emails_need_a_store_for_haymans() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Haymans 2025", "Gate Valve 25mm", "GV25", "12.50", "2");
        ctx.add_manual("Rexel", "Plate", "P1", "2.00", "1");

        // when
        ctx.command()
            .args(prepare_args(vec!["po email --job J100"]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stderr(predicate::str::contains(
                "A store is required for purchase orders from this supplier. supplier: Haymans",
            ))
            .stdout(predicate::str::contains("Subject").not());

        // when
        ctx.command()
            .args(prepare_args(vec!["po email --job J100 --store Geelong"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::contains(indoc! {"
                Subject: PO request - Haymans Geelong - job J100

                Hi,

                Please forward a PO to Haymans Geelong for job J100
                2 x Gate Valve 25mm — GV25 — $12.50 each (Haymans price list)

                Thanks"}))
            .stdout(predicate::str::contains("Subject: PO request - Rexel - job J100"));
    }

    #[test]
    fn default_job_from_config() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Rexel", "Plate", "P1", "2.00", "1");

        // when
        ctx.command()
            .args(prepare_args(vec!["config set --job J9"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout("Default job: J9\nDefault sort: SUPPLIER:ASC\n");

        // when
        ctx.command()
            .args(prepare_args(vec!["email quote"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Subject: Quote - job J9"))
            .stdout(predicate::str::contains("Please find our quote for job J9 below."));
    }
}

mod build_case {
    use indoc::indoc;
    use predicates::prelude::*;
    use util::test::{prepare_args, print};

    use crate::common::Context;

    #[test]
    fn estimator_notes() {
        // given
        let ctx = Context::new();
        ctx.add_manual("Haymans 2025", "Gate Valve 25mm", "GV25", "12.50", "2");

        // and
        ctx.command()
            .args(prepare_args(vec![
                "build-case set --nt-hours 4 --nt-techs 2 --nt-travel 1 --nights 1 --routine no",
            ]))
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::contains("Total man hours: 10"));

        // and
        let expected_notes = indoc! {"
            Estimator notes:
            2 x Gate Valve 25mm — GV25 — $12.50 each (Haymans price)

            4 hours 2 men NT
            1 hours 2 men NT Travel
            Total labour: 10 hours
            1 x Overnight accommodation
            Not intended to be completed on routine visit
        "};

        // when
        ctx.command()
            .args(prepare_args(vec!["build-case notes"]))
            // then
            .assert()
            .success()
            .stderr(print("stderr"))
            .stdout(print("stdout"))
            .stdout(predicate::str::ends_with(expected_notes));
    }

    #[test]
    fn negative_hours_are_rejected() {
        // given
        let ctx = Context::new();

        // when
        ctx.command()
            .args(prepare_args(vec!["build-case set --nt-hours -1"]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains("Hours must not be negative. field: nt_hours, value: -1"));
    }

    #[test]
    fn man_hours_too_large_are_rejected() {
        // given
        let ctx = Context::new();

        // when
        ctx.command()
            .args(prepare_args(vec!["build-case set --nt-hours 79228162514264337593543950335 --nt-techs 2"]))
            // then
            .assert()
            .failure()
            .stderr(print("stderr"))
            .stderr(predicate::str::contains("Man hours are too large."));
    }

    #[test]
    fn wizard_steps() {
        // given
        let ctx = Context::new();

        // when
        ctx.command()
            .args(prepare_args(vec!["build-case step next"]))
            // then
            .assert()
            .success()
            .stdout(print("stdout"))
            .stdout(predicate::str::starts_with("Step 2 of 3"));

        // when
        ctx.command()
            .args(prepare_args(vec!["build-case step previous"]))
            // then
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Step 1 of 3"));
    }
}
