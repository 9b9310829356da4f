use dns::{NameQuery, QType};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const STOP: &str = "--stop";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Query(NameQuery),
    Stop,
}

/// Reads record type / domain name pairs from the user.
pub struct Console<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Console<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Prompts until a valid pair is entered. End of input and `--stop`
    /// both end the session.
    pub async fn next_command(&mut self) -> std::io::Result<Command> {
        let q_type = loop {
            println!("\nChoose a record type:");
            for q_type in QType::ALL {
                println!("{} - {}", q_type.code(), q_type);
            }

            let Some(line) = self.lines.next_line().await? else {
                return Ok(Command::Stop);
            };
            if line.trim().starts_with(STOP) {
                return Ok(Command::Stop);
            }

            match line.parse::<QType>() {
                Ok(q_type) => break q_type,
                Err(_) => println!("Invalid command: {:?}", line.trim()),
            }
        };

        loop {
            println!("Enter a domain name:");

            let Some(line) = self.lines.next_line().await? else {
                return Ok(Command::Stop);
            };
            let domain = line.trim();
            if domain.starts_with(STOP) {
                return Ok(Command::Stop);
            }
            if domain.is_empty() {
                println!("Invalid domain name");
                continue;
            }

            return Ok(Command::Query(NameQuery::new(domain, q_type)));
        }
    }
}
