use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub name: String,
    pub salary: i64,
    #[sea_orm(indexed)]
    pub department_id: i32,
    #[sea_orm(indexed)]
    pub profession_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_delete = "Restrict"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::professions::Entity",
        from = "Column::ProfessionId",
        to = "super::professions::Column::Id",
        on_delete = "Restrict"
    )]
    Profession,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::professions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
