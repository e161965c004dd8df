//! Encode a phone book to JSON text, decode it back, and print every
//! contact. Run with: `cargo run --example phone_book`

use codable::{from_str, to_string, Codable, DecodeNode, EncodeNode, Result};

#[derive(Default, Debug, Clone, PartialEq)]
struct PhoneNumber {
    country: i32,
    number: i64,
}

impl Codable for PhoneNumber {
    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.field("country", &self.country)?;
        node.field("number", &self.number)
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        self.country = node.field("country")?;
        self.number = node.field("number")?;
        Ok(())
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
struct Contact {
    name: String,
    phone: PhoneNumber,
}

impl Codable for Contact {
    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.field("name", &self.name)?;
        node.field("phone", &self.phone)
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        self.name = node.field("name")?;
        self.phone = node.field_or("phone", PhoneNumber::default())?;
        Ok(())
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
struct PhoneBook {
    contacts: Vec<Contact>,
}

impl Codable for PhoneBook {
    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.field("contacts", &self.contacts)
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        self.contacts = node.field_or("contacts", Vec::new())?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let book = PhoneBook {
        contacts: vec![
            Contact {
                name: "Eugene".to_string(),
                phone: PhoneNumber {
                    country: 123,
                    number: 456789,
                },
            },
            Contact {
                name: "Alice".to_string(),
                phone: PhoneNumber {
                    country: 44,
                    number: 7700900123,
                },
            },
        ],
    };

    let text = to_string(&book)?;
    println!("encoded:\n{}\n", text);

    let decoded: PhoneBook = from_str(&text)?;
    println!("decoded {} contacts:", decoded.contacts.len());
    for contact in &decoded.contacts {
        println!(
            "  {} -> +{} {}",
            contact.name, contact.phone.country, contact.phone.number
        );
    }

    assert_eq!(decoded, book);
    Ok(())
}
