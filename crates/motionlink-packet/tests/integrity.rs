use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use motionlink_opcodes::{command, reply, ControlCode, Seq};
use motionlink_packet::{
    build, check, decode_packet, verify, Incoming, LinkConfig, LinkReader, LinkWriter, NullSink,
    PacketError, BLOCK_SIZE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_payload(rng: &mut StdRng, blocks: usize) -> Vec<u8> {
    (0..blocks * BLOCK_SIZE).map(|_| rng.random()).collect()
}

#[test]
fn encoded_packets_verify() {
    let mut rng = StdRng::seed_from_u64(0x6d6c);
    for len in 0..48 {
        let payload: Vec<u8> = (0..len).map(|_| rng.random()).collect();
        let packet = build(&payload);
        assert!(verify(&packet).is_ok(), "len {len}");
        assert_eq!(decode_packet(&packet).unwrap(), payload.as_slice());
    }
}

#[test]
fn every_single_bit_flip_is_detected() {
    let mut rng = StdRng::seed_from_u64(42);
    for blocks in 1..=10 {
        let packet = build(&random_payload(&mut rng, blocks)).to_vec();
        for byte in 0..packet.len() {
            for bit in 0..8 {
                let mut corrupt = packet.clone();
                corrupt[byte] ^= 1 << bit;
                assert!(
                    !check(&corrupt, &NullSink),
                    "flip of bit {bit} in byte {byte} of {blocks}-block packet went unnoticed"
                );
            }
        }
    }
}

#[test]
fn encoding_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let payload = random_payload(&mut rng, 16);
    assert_eq!(build(&payload), build(&payload));
}

#[test]
fn swapped_checksum_bytes_fail_sequence_check() {
    let mut packet = build(&[1, 2, 3, 4, 5, 6]).to_vec();
    packet.swap(6, 7);
    assert!(matches!(
        verify(&packet),
        Err(PacketError::SequenceMismatch { block: 0, .. })
    ));
}

#[test]
fn concurrent_verification_shares_one_sink() {
    let failures = Arc::new(Mutex::new(0usize));
    let sink: Arc<dyn motionlink_packet::DiagnosticSink> = {
        let failures = Arc::clone(&failures);
        Arc::new(move |_: &str| *failures.lock().unwrap() += 1)
    };

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                let mut packet = build(&[i; 30]).to_vec();
                if i % 2 == 1 {
                    packet[0] ^= 0x40;
                }
                check(&packet, sink.as_ref())
            })
        })
        .collect();

    let valid = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(valid, 4);
    assert_eq!(*failures.lock().unwrap(), 4);
}

#[test]
fn host_and_device_exchange_over_tcp_bridge() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let device = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = LinkReader::new(stream.try_clone().unwrap());
        let mut writer = LinkWriter::new(stream);

        writer.send_control(ControlCode::Startup).unwrap();
        let msg = reader.read_message().unwrap();
        assert_eq!(msg, Incoming::Packet(vec![command::GETTIME].into()));

        writer.send_control(ControlCode::Ack(Seq::ZERO)).unwrap();
        writer.send_packet(&[reply::TIME, 0x10, 0x20, 0x30, 0x40]).unwrap();
        writer.send_debug("tick").unwrap();
    });

    let stream = TcpStream::connect(addr).unwrap();
    let mut reader = LinkReader::with_config(stream.try_clone().unwrap(), LinkConfig::default());
    let mut writer = LinkWriter::new(stream);

    assert_eq!(
        reader.read_message().unwrap(),
        Incoming::Control(ControlCode::Startup)
    );
    writer.send_packet(&[command::GETTIME]).unwrap();
    assert_eq!(
        reader.read_message().unwrap(),
        Incoming::Control(ControlCode::Ack(Seq::ZERO))
    );
    assert_eq!(
        reader.read_message().unwrap(),
        Incoming::Packet(vec![reply::TIME, 0x10, 0x20, 0x30, 0x40].into())
    );
    assert_eq!(
        reader.read_message().unwrap(),
        Incoming::Debug("tick".to_string())
    );

    device.join().unwrap();
}
