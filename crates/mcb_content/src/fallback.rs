//! Static articles served whenever the content API cannot answer.

use lazy_static::lazy_static;
use mcb_core::{reading_time, Article, CardInfo};

lazy_static! {
    static ref FALLBACK_ARTICLES: Vec<Article> = [
        Article {
            id: "1".to_string(),
            slug: "nubank-ultravioleta".to_string(),
            title: "Nubank Ultravioleta: Vale a Pena?".to_string(),
            excerpt: "Análise completa do cartão premium do Nubank".to_string(),
            content: "O **Nubank Ultravioleta** é o cartão premium do Nubank.

## O que diferencia o Ultravioleta?

Este cartão traz benefícios exclusivos:

- Metal Premium: Aço inoxidável e tungstênio
- Atendimento Prioritário: Time dedicado
- Saques Grátis: Ilimitados internacionalmente
- Lounge Nubank: Acesso em Guarulhos

## Vale a Pena?

Depende do seu perfil. Viajantes podem se beneficiar."
                .to_string(),
            image: Some("https://images.unsplash.com/photo-1563013544-824ae1b704d3?w=800&q=80".to_string()),
            author: None,
            published_at: "10 Fev 2026".to_string(),
            reading_time: String::new(),
            category: Some("Reviews".to_string()),
            tags: vec!["nubank".to_string(), "cartão premium".to_string()],
            card_info: Some(CardInfo {
                name: "Nubank Ultravioleta".to_string(),
                color: "#820AD1".to_string(),
                annual_fee: "R$ 490/ano".to_string(),
                benefits: vec![
                    "Metal premium".to_string(),
                    "Atendimento prioritário".to_string(),
                    "Saques internacionais Grátis".to_string(),
                    "Lounge Nubank".to_string(),
                ],
            }),
        },
        Article {
            id: "2".to_string(),
            slug: "melhores-cartoes-sem-anuidade".to_string(),
            title: "Top 10 Cartões sem Anuidade 2026".to_string(),
            excerpt: "Os melhores cartões que não cobram anuidade".to_string(),
            content: "A busca por cartões sem anuidade continua forte.

## Ranking dos Melhores

1. **Nubank**: O líder do mercado
2. **Inter**: Benefícios digitais
3. **C6 Bank**: Programa de pontos

## Como Escolher?

Avalie taxas, benefícios e qualidade do app."
                .to_string(),
            image: Some("https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=800&q=80".to_string()),
            author: None,
            published_at: "8 Fev 2026".to_string(),
            reading_time: String::new(),
            category: Some("Comparativos".to_string()),
            tags: vec!["sem anuidade".to_string(), "rankings".to_string()],
            card_info: None,
        },
        Article {
            id: "3".to_string(),
            slug: "como-escolher-cartao".to_string(),
            title: "Como Escolher o Cartão Ideal".to_string(),
            excerpt: "Guia completo para escolher seu cartão de crédito".to_string(),
            content: "Escolher o cartão ideal pode parecer complicado!

## Critérios Importantes

### 1. Anuidade
Cartões sem anuidade são ideais.

### 2. Programa de Pontos
Para quem viaja, priorize milhas.

### 3. Taxas de Juros
Sempre negocie à vista."
                .to_string(),
            image: Some("https://images.unsplash.com/photo-1554224155-8d04cb21cd6c?w=800&q=80".to_string()),
            author: None,
            published_at: "5 Fev 2026".to_string(),
            reading_time: String::new(),
            category: Some("Guias".to_string()),
            tags: vec!["guia".to_string(), "dicas".to_string()],
            card_info: None,
        },
    ]
    .into_iter()
    .map(|article| Article {
        reading_time: reading_time(&article.content),
        ..article
    })
    .collect();
}

pub fn articles() -> &'static [Article] {
    &FALLBACK_ARTICLES
}

/// Slice `[offset, offset + limit)` of the dataset, clamped to its bounds.
pub fn page(limit: usize, offset: usize) -> Vec<Article> {
    articles().iter().skip(offset).take(limit).cloned().collect()
}

pub fn find(slug: &str) -> Option<Article> {
    articles().iter().find(|a| a.slug == slug).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_are_unique_and_complete() {
        let slugs: HashSet<_> = articles().iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs.len(), 3);
        for article in articles() {
            assert!(!article.title.is_empty());
            assert!(!article.content.is_empty());
            assert!(article.image.is_some());
        }
    }

    #[test]
    fn test_page_slices_in_order() {
        let slugs: Vec<_> = page(2, 1).into_iter().map(|a| a.slug).collect();
        assert_eq!(slugs, vec!["melhores-cartoes-sem-anuidade", "como-escolher-cartao"]);
    }

    #[test]
    fn test_page_out_of_range_is_empty() {
        assert!(page(10, 3).is_empty());
        assert!(page(0, 0).is_empty());
        assert_eq!(page(10, 0).len(), 3);
        assert_eq!(page(usize::MAX, 2).len(), 1);
    }

    #[test]
    fn test_reading_time_follows_content() {
        for article in articles() {
            assert_eq!(article.reading_time, reading_time(&article.content), "{}", article.slug);
        }
    }

    #[test]
    fn test_find() {
        let article = find("nubank-ultravioleta").unwrap();
        assert_eq!(article.card_info.unwrap().annual_fee, "R$ 490/ano");
        assert!(find("nao-existe").is_none());
    }
}
