//! Synthetic payload factories for ComandaLivre stories.
//!
//! Mirrors the payload shapes the API accepts: registrations, companies,
//! products, tables, invitations, commands and order forms, with pt-BR
//! flavored names. Seed the generator for reproducible runs; by default it
//! draws from entropy.

pub mod payloads;
mod pools;

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

pub use payloads::{
    CommandCreate, CompanyCreate, EmployeeInvite, OrderForm, OrderItem, ProductCreate,
    ProductUpdate, TableBulkCreate, TableCreate, TableUpdate, UserRegistration,
};

/// Process-wide sequence for email uniqueness across generators.
static EMAIL_SEQ: AtomicU64 = AtomicU64::new(0);

pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Generator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool.choose(&mut self.rng).copied().unwrap_or("")
    }

    // ──────────────────────────────────────────────
    // Scalar pieces
    // ──────────────────────────────────────────────

    pub fn full_name(&mut self) -> String {
        format!(
            "{} {}",
            self.pick(pools::FIRST_NAMES),
            self.pick(pools::SURNAMES)
        )
    }

    /// Mobile number in the national `(DD) 9XXXX-XXXX` format.
    pub fn cellphone(&mut self) -> String {
        let area = self.pick(pools::AREA_CODES);
        let first: u32 = self.rng.gen_range(7000..=9999);
        let second: u32 = self.rng.gen_range(0..=9999);
        format!("({}) 9{:04}-{:04}", area, first, second)
    }

    /// Unique email: pt-BR local part + process-wide sequence.
    pub fn unique_email(&mut self, name: &str) -> String {
        let local = name
            .split_whitespace()
            .next()
            .unwrap_or("usuario")
            .to_lowercase()
            .replace('.', "");
        let seq = EMAIL_SEQ.fetch_add(1, Ordering::Relaxed);
        let salt: u32 = self.rng.gen_range(0x1000..=0xffff);
        format!("{}.{}{:x}@comandalivre-test.com", local, seq, salt)
    }

    /// Password with at least one of each required character class.
    pub fn password(&mut self) -> String {
        const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
        const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
        const DIGIT: &[u8] = b"23456789";
        const SPECIAL: &[u8] = b"!@#$%&*";
        let mut chars: Vec<u8> = vec![
            LOWER[self.rng.gen_range(0..LOWER.len())],
            UPPER[self.rng.gen_range(0..UPPER.len())],
            DIGIT[self.rng.gen_range(0..DIGIT.len())],
            SPECIAL[self.rng.gen_range(0..SPECIAL.len())],
        ];
        let all: Vec<u8> = [LOWER, UPPER, DIGIT, SPECIAL].concat();
        while chars.len() < 12 {
            chars.push(all[self.rng.gen_range(0..all.len())]);
        }
        chars.shuffle(&mut self.rng);
        String::from_utf8(chars).unwrap_or_else(|_| "Troca-senha1!".into())
    }

    /// Valid CNPJ (root + `/0001` branch + check digits), formatted.
    pub fn cnpj(&mut self) -> String {
        let mut digits: Vec<u32> = (0..8).map(|_| self.rng.gen_range(0..10)).collect();
        digits.extend([0, 0, 0, 1]);
        let dv1 = cnpj_check_digit(&digits, &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
        digits.push(dv1);
        let dv2 = cnpj_check_digit(&digits, &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
        digits.push(dv2);
        format!(
            "{}{}.{}{}{}.{}{}{}/{}{}{}{}-{}{}",
            digits[0], digits[1], digits[2], digits[3], digits[4], digits[5], digits[6],
            digits[7], digits[8], digits[9], digits[10], digits[11], digits[12], digits[13],
        )
    }

    /// Random v4-shaped identifier in the 8-4-4-4-12 hex format; used to
    /// reference entities that are guaranteed not to exist.
    pub fn random_entity_id(&mut self) -> String {
        const HEX: &[u8] = b"0123456789abcdef";
        let mut id = String::with_capacity(36);
        for i in 0..36 {
            match i {
                8 | 13 | 18 | 23 => id.push('-'),
                14 => id.push('4'),
                19 => id.push(['8', '9', 'a', 'b'][self.rng.gen_range(0..4)]),
                _ => id.push(HEX[self.rng.gen_range(0..HEX.len())] as char),
            }
        }
        id
    }

    fn price(&mut self) -> Decimal {
        // 1.00 ..= 99.99, two decimal places.
        Decimal::new(self.rng.gen_range(100..10_000), 2)
    }

    fn dish(&mut self) -> String {
        self.pick(pools::DISHES).to_string()
    }

    fn sentence(&mut self) -> String {
        format!(
            "{} servido com {}",
            self.pick(pools::DISHES),
            self.pick(pools::INGREDIENTS)
        )
    }

    // ──────────────────────────────────────────────
    // Payload factories
    // ──────────────────────────────────────────────

    pub fn user_data(&mut self) -> UserRegistration {
        let name = self.full_name();
        let email = self.unique_email(&name);
        let phone = self.cellphone();
        let password = self.password();
        UserRegistration {
            name,
            email,
            phone,
            password_confirmation: password.clone(),
            password,
        }
    }

    pub fn company_data(&mut self) -> CompanyCreate {
        let name = format!(
            "{} {}",
            self.pick(pools::COMPANY_STEMS),
            self.pick(pools::COMPANY_QUALIFIERS)
        );
        let email = self.unique_email(&name);
        CompanyCreate {
            name,
            email,
            phone: self.cellphone(),
            cnpj: self.cnpj(),
            description: self.pick(pools::CATCH_PHRASES).to_string(),
            company_type: "RESTAURANT".into(),
        }
    }

    pub fn product_data(&mut self, company_id: &str, category_id: &str) -> ProductCreate {
        ProductCreate {
            name: self.dish(),
            price: self.price(),
            description: self.sentence(),
            ingredients: (0..3)
                .map(|_| self.pick(pools::INGREDIENTS).to_string())
                .collect(),
            serves_persons: self.rng.gen_range(1..=4),
            company_id: company_id.into(),
            category_id: category_id.into(),
            availability: true,
        }
    }

    pub fn product_update_data(&mut self, company_id: &str, category_id: &str) -> ProductUpdate {
        ProductUpdate {
            name: format!("{} Atualizado", self.dish()),
            price: self.price(),
            description: self.sentence(),
            company_id: company_id.into(),
            category_id: category_id.into(),
            availability: true,
        }
    }

    pub fn table_data(&mut self, company_id: &str, name: &str) -> TableCreate {
        TableCreate {
            name: name.into(),
            num_people: self.rng.gen_range(2..=8),
            description: format!("Mesa com vista para {}", self.pick(pools::STREETS)),
            company_id: company_id.into(),
        }
    }

    pub fn table_update_data(&mut self) -> TableUpdate {
        TableUpdate {
            name: format!("Mesa Atualizada {}", self.rng.gen_range(1..=9)),
            num_people: self.rng.gen_range(2..=10),
            description: self.sentence(),
        }
    }

    pub fn table_bulk_data(
        &mut self,
        company_id: &str,
        start: u32,
        end: u32,
        num_people: u32,
        description: Option<&str>,
    ) -> TableBulkCreate {
        TableBulkCreate {
            company_id: company_id.into(),
            start,
            end,
            num_people,
            description: description
                .map(str::to_string)
                .unwrap_or_else(|| self.sentence()),
        }
    }

    pub fn employee_invite_data(
        &mut self,
        company_id: &str,
        role_id: &str,
        email: &str,
    ) -> EmployeeInvite {
        EmployeeInvite {
            company_id: company_id.into(),
            role_id: role_id.into(),
            email: email.into(),
        }
    }

    pub fn command_data(&mut self, table_id: &str, employee_id: &str) -> CommandCreate {
        CommandCreate {
            name: self.full_name(),
            number_of_people: self.rng.gen_range(1..=10),
            table_id: table_id.into(),
            employee_id: employee_id.into(),
        }
    }

    pub fn order_notes(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.sentence()).collect()
    }

    /// Order form; `notes` overrides the generated per-item notes and must
    /// then match `product_ids` in length.
    pub fn order_form(
        &mut self,
        command_id: &str,
        product_ids: &[String],
        notes: Option<Vec<String>>,
    ) -> OrderForm {
        let notes = notes.unwrap_or_else(|| self.order_notes(product_ids.len()));
        let items = product_ids
            .iter()
            .zip(notes)
            .map(|(product_id, notes)| OrderItem {
                product_id: product_id.clone(),
                notes,
            })
            .collect();
        OrderForm {
            command_id: command_id.into(),
            items,
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        rest => 11 - rest,
    }
}
