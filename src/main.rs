//! pagesim - Main Entry Point
//!
//! Usage: pagesim <commands>
//!
//! Commands (any number, processed left to right):
//!   pfm                  - print the free-page map
//!   ppt <proc>           - print a process's page table
//!   np <proc> <pages>    - create a process with <pages> data pages
//!   kp <proc>            - kill a process, reclaiming its pages
//!   sb <proc> <va> <val> - store a byte through address translation
//!   lb <proc> <va>       - load a byte through address translation

use std::env;
use std::fmt::Display;
use std::process;
use std::slice;
use std::str::FromStr;

use pagesim::access::{load_value, store_value};
use pagesim::allocator::is_page_free;
use pagesim::constants::*;
use pagesim::memory::{PhysicalMemory, page_address};
use pagesim::process::{kill_process, new_process};
use pagesim::table::get_page_table;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() == 1 {
        eprintln!("usage: pagesim commands");
        process::exit(1);
    }

    let mut mem = PhysicalMemory::initialized();

    if let Err(e) = run(&mut mem, &args[1..]) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

/// Drive the simulator over the command token stream.
fn run(mem: &mut PhysicalMemory, args: &[String]) -> Result<(), String> {
    let mut tokens = args.iter();

    while let Some(command) = tokens.next() {
        match command.as_str() {
            "pfm" => print_page_free_map(mem),
            "ppt" => {
                let proc_num = next_operand(&mut tokens, "ppt", "proc_num")?;
                print_page_table(mem, proc_num);
            }
            "np" => {
                let proc_num = next_operand(&mut tokens, "np", "proc_num")?;
                let page_count = next_operand(&mut tokens, "np", "page_count")?;
                if let Err(e) = new_process(mem, proc_num, page_count) {
                    // OOM diagnostics go to stdout with the rest of the
                    // simulator output. Data-page exhaustion halts the run.
                    println!("{}", e);
                    if e.is_fatal() {
                        process::exit(1);
                    }
                }
            }
            "kp" => {
                let proc_num = next_operand(&mut tokens, "kp", "proc_num")?;
                kill_process(mem, proc_num);
            }
            "sb" => {
                let proc_num = next_operand(&mut tokens, "sb", "proc_num")?;
                let virtual_address = next_operand(&mut tokens, "sb", "virtual_address")?;
                let value = next_operand(&mut tokens, "sb", "value")?;
                println!("{}", store_value(mem, proc_num, virtual_address, value));
            }
            "lb" => {
                let proc_num = next_operand(&mut tokens, "lb", "proc_num")?;
                let virtual_address = next_operand(&mut tokens, "lb", "virtual_address")?;
                println!("{}", load_value(mem, proc_num, virtual_address));
            }
            other => {
                return Err(format!("unknown command: {}", other));
            }
        }
    }

    Ok(())
}

/// Pull and parse the next integer operand for `command`.
fn next_operand<T>(
    tokens: &mut slice::Iter<'_, String>,
    command: &str,
    name: &str,
) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    let token = tokens
        .next()
        .ok_or_else(|| format!("{}: missing {} operand", command, name))?;
    token
        .parse()
        .map_err(|e| format!("{}: invalid {} operand {:?}: {}", command, name, token, e))
}

/// Print the free-page map as a 4-row grid: `#` allocated, `.` free.
fn print_page_free_map(mem: &PhysicalMemory) {
    println!("--- PAGE FREE MAP ---");

    for page in 0..PAGE_COUNT {
        print!("{}", if is_page_free(mem, page) { '.' } else { '#' });

        if (page + 1) % 16 == 0 {
            println!();
        }
    }
}

/// Print every nonzero page-table entry as `virtual -> physical` in hex.
fn print_page_table(mem: &PhysicalMemory, proc_num: usize) {
    println!("--- PROCESS {} PAGE TABLE ---", proc_num);

    let table_page = get_page_table(mem, proc_num);

    for entry in 0..PAGE_COUNT {
        let page = mem.read(page_address(table_page as usize, entry));

        if page != 0 {
            println!("{:02x} -> {:02x}", entry, page);
        }
    }
}
