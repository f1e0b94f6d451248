use std::{
    io::{self, Read, Write},
    net::TcpStream,
};

use anyhow::bail;
use netpad_messages::{ClientMessage, Message, Reader, Snapshot, Writer, PROTOCOL_VERSION};
use netpad_server::Address;
use netpad_syntax::tokenize;

use crate::render::{render, Format};

type Connection = (Box<dyn Read>, Box<dyn Write>);

fn connect(addr: &Address) -> anyhow::Result<Connection> {
    match addr {
        Address::Tcp(addr) => {
            let stream = TcpStream::connect(addr)?;
            stream.set_nodelay(true)?;
            let write = stream.try_clone()?;
            Ok((Box::new(stream), Box::new(write)))
        }
        #[cfg(unix)]
        Address::UnixDomainSocket(path) => {
            let stream = std::os::unix::net::UnixStream::connect(path)?;
            let write = stream.try_clone()?;
            Ok((Box::new(stream), Box::new(write)))
        }
        #[cfg(not(unix))]
        Address::UnixDomainSocket(_) => {
            bail!("Unix domain sockets are not supported on this platform")
        }
    }
}

/// Print every snapshot the mirror at `addr` sends until it says goodbye
pub(crate) fn run(addr: &Address, format: Format) -> anyhow::Result<()> {
    let (read, write) = connect(addr)?;
    log::info!("Connected to {addr}");

    let mut writer: Writer<_, Message> = Writer::new(write);
    writer.write(&Message::Hello)?;

    let reader: Reader<_, ClientMessage> = Reader::new(read);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for msg in reader {
        match msg? {
            ClientMessage::Hello { version } => {
                if version != PROTOCOL_VERSION {
                    let _ = writer.write(&Message::Bye);
                    bail!("Mirror speaks protocol {version}, expected {PROTOCOL_VERSION}");
                }
            }
            ClientMessage::Snapshot(snapshot) => {
                print_snapshot(&mut out, &snapshot, format)?;
            }
            ClientMessage::Bye => {
                log::info!("Mirror said goodbye");
                return Ok(());
            }
        }
    }

    log::info!("Mirror closed the connection");
    Ok(())
}

fn print_snapshot(out: &mut impl Write, snapshot: &Snapshot, format: Format) -> io::Result<()> {
    let now = chrono::Local::now();
    writeln!(
        out,
        "--- revision {} ({}) at {}",
        snapshot.revision,
        snapshot.language,
        now.format("%H:%M:%S")
    )?;

    let tokens = tokenize(&snapshot.text, snapshot.language);
    out.write_all(render(&tokens, format).as_bytes())?;
    if !snapshot.text.is_empty() && !snapshot.text.ends_with('\n') {
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use netpad_syntax::Language;

    use super::*;

    #[test]
    fn snapshot_output() {
        let snapshot = Snapshot {
            revision: 3,
            language: Language::Html,
            text: "<b>hi</b>".into(),
        };

        let mut out = vec![];
        print_snapshot(&mut out, &snapshot, Format::Markup).unwrap();
        let out = String::from_utf8(out).unwrap();

        let mut lines = out.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("--- revision 3 (html) at "), "{header}");
        assert_eq!(Some("<b>hi</b>"), lines.next());
        assert_eq!(None, lines.next());
    }
}
