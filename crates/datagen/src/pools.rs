//! Word pools for pt-BR flavored synthetic data.

pub const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Camila", "Diego", "Eduarda", "Felipe", "Gabriela", "Henrique", "Isabela",
    "João", "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael", "Sofia", "Thiago",
    "Valentina", "William",
];

pub const SURNAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Dias", "Ferreira", "Gomes", "Lima", "Martins", "Nascimento",
    "Oliveira", "Pereira", "Ribeiro", "Santos", "Silva", "Souza", "Teixeira",
];

pub const DISHES: &[&str] = &[
    "Feijoada Completa", "Moqueca de Peixe", "Picanha na Brasa", "Escondidinho de Carne Seca",
    "Bobó de Camarão", "Galinhada Mineira", "Baião de Dois", "Virado à Paulista",
    "Arroz de Polvo", "Frango à Passarinho", "Dobradinha", "Rabada com Agrião",
    "Vaca Atolada", "Tutu de Feijão", "Carne de Sol com Macaxeira",
];

pub const INGREDIENTS: &[&str] = &[
    "feijão preto", "camarão", "leite de coco", "mandioca", "queijo coalho", "linguiça",
    "couve", "farinha de milho", "pimenta de cheiro", "coentro", "azeite de dendê", "carne seca",
];

pub const COMPANY_STEMS: &[&str] = &[
    "Cantina", "Churrascaria", "Restaurante", "Bistrô", "Boteco", "Pizzaria", "Lanchonete",
    "Casa", "Empório", "Sabor",
];

pub const COMPANY_QUALIFIERS: &[&str] = &[
    "da Esquina", "do Porto", "Mineira", "do Centro", "Tropical", "da Serra", "Paulista",
    "do Mercado", "Nordestina", "da Praça",
];

pub const CATCH_PHRASES: &[&str] = &[
    "Comida de verdade todos os dias",
    "O melhor tempero da cidade",
    "Tradição e sabor desde sempre",
    "Do fogão direto para a sua mesa",
    "Receitas de família, preço justo",
];

pub const STREETS: &[&str] = &[
    "Rua das Flores", "Avenida Atlântica", "Praça da Matriz", "Rua XV de Novembro",
    "Avenida Paulista", "Rua do Comércio", "Travessa do Mercado", "Alameda Santos",
];

/// DDD area codes in use, per the national numbering plan.
pub const AREA_CODES: &[&str] = &[
    "11", "12", "13", "14", "15", "16", "17", "18", "19", "21", "22", "24", "27", "28", "31",
    "32", "33", "34", "35", "37", "38", "41", "42", "43", "44", "45", "46", "47", "48", "49",
    "51", "53", "54", "55", "61", "62", "63", "64", "65", "66", "67", "68", "69", "71", "73",
    "74", "75", "77", "79", "81", "82", "83", "84", "85", "86", "87", "88", "89", "91", "92",
    "93", "94", "95", "96", "97", "98", "99",
];
